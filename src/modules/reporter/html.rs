use crate::modules::common::error::SweepError;
use crate::modules::detector::models::{Candidate, Confidence};
use super::models::ScanReport;

/// 生成 HTML 报告
pub fn generate_html_report(report: &ScanReport) -> Result<String, SweepError> {
    let high = count_by_confidence(&report.candidates, Confidence::High);
    let medium = count_by_confidence(&report.candidates, Confidence::Medium);
    let low = count_by_confidence(&report.candidates, Confidence::Low);

    let html = format!(r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>残留扫描报告 - {}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: "Segoe UI", "Microsoft YaHei", sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }}
        .container {{
            max-width: 900px;
            margin: 0 auto;
            background: white;
            border-radius: 16px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
            overflow: hidden;
        }}
        .header {{
            background: linear-gradient(135deg, #2c3e50 0%, #34495e 100%);
            color: white;
            padding: 30px;
        }}
        .header h1 {{
            font-size: 28px;
            margin-bottom: 10px;
        }}
        .header .meta {{
            opacity: 0.8;
            font-size: 14px;
        }}
        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            padding: 30px;
            background: #f8f9fa;
        }}
        .stat {{
            background: white;
            padding: 20px;
            border-radius: 12px;
            text-align: center;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }}
        .stat .value {{
            font-size: 32px;
            font-weight: bold;
            color: #667eea;
        }}
        .stat .label {{
            color: #666;
            margin-top: 8px;
            font-size: 14px;
        }}
        .high .value {{ color: #e74c3c; }}
        .medium .value {{ color: #f39c12; }}
        .low .value {{ color: #27ae60; }}
        .content {{
            padding: 30px;
        }}
        .section-title {{
            font-size: 18px;
            color: #2c3e50;
            margin-bottom: 20px;
            padding-bottom: 10px;
            border-bottom: 2px solid #667eea;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin-bottom: 20px;
        }}
        th, td {{
            padding: 12px 15px;
            text-align: left;
            border-bottom: 1px solid #eee;
        }}
        th {{
            background: #f8f9fa;
            color: #2c3e50;
            font-weight: 600;
        }}
        tr:hover {{
            background: #f8f9fa;
        }}
        .status {{
            display: inline-block;
            padding: 4px 12px;
            border-radius: 20px;
            font-size: 12px;
            font-weight: 600;
        }}
        .status.high {{
            background: #f8d7da;
            color: #721c24;
        }}
        .status.medium {{
            background: #fff3cd;
            color: #856404;
        }}
        .status.low {{
            background: #d4edda;
            color: #155724;
        }}
        .type-badge {{
            display: inline-block;
            padding: 4px 10px;
            border-radius: 6px;
            font-size: 12px;
            background: #e9ecef;
            color: #495057;
        }}
        .path {{
            font-family: "Consolas", monospace;
            font-size: 13px;
            color: #666;
            word-break: break-all;
        }}
        .evidence {{
            font-size: 12px;
            color: #888;
        }}
        .warnings {{
            background: #fff3cd;
            border-left: 4px solid #ffc107;
            padding: 15px 20px;
            margin-bottom: 20px;
        }}
        .warnings h3 {{
            color: #856404;
            margin-bottom: 10px;
        }}
        .warnings ul {{
            margin-left: 20px;
            color: #856404;
        }}
        .footer {{
            background: #f8f9fa;
            padding: 20px 30px;
            text-align: center;
            color: #666;
            font-size: 13px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>残留扫描报告</h1>
            <div class="meta">
                <p>程序: <strong>{}</strong></p>
                <p>生成时间: {}</p>
                <p>报告ID: {}</p>
            </div>
        </div>

        <div class="summary">
            <div class="stat">
                <div class="value">{}</div>
                <div class="label">候选残留</div>
            </div>
            <div class="stat high">
                <div class="value">{}</div>
                <div class="label">高置信度</div>
            </div>
            <div class="stat medium">
                <div class="value">{}</div>
                <div class="label">中置信度</div>
            </div>
            <div class="stat low">
                <div class="value">{}</div>
                <div class="label">低置信度</div>
            </div>
        </div>

        <div class="content">
            {}
            {}
        </div>

        <div class="footer">
            <p>由 Rust-Sweep 残留扫描工具生成，本报告只列出候选，不会删除任何内容</p>
        </div>
    </div>
</body>
</html>"#,
        escape_html(&report.program_name),
        escape_html(&report.program_name),
        report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        report.id,
        report.candidates.len(),
        high,
        medium,
        low,
        generate_warnings(&report.warnings),
        generate_candidates_table(&report.candidates),
    );

    Ok(html)
}

fn count_by_confidence(candidates: &[Candidate], confidence: Confidence) -> usize {
    candidates
        .iter()
        .filter(|c| c.confidence() == confidence)
        .count()
}

fn generate_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"
        <div class="warnings">
            <h3>警告</h3>
            <ul>
    "#,
    );
    for warning in warnings {
        html.push_str(&format!("<li>{}</li>", escape_html(warning)));
    }
    html.push_str("</ul></div>");
    html
}

fn generate_candidates_table(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "<p>未发现残留</p>".to_string();
    }

    let mut html = String::from(
        r#"
        <h2 class="section-title">候选详情</h2>
        <table>
            <thead>
                <tr>
                    <th>置信度</th>
                    <th>类型</th>
                    <th>路径</th>
                    <th>证据</th>
                </tr>
            </thead>
            <tbody>
    "#,
    );

    for candidate in candidates {
        let status_html = match candidate.confidence() {
            Confidence::High => r#"<span class="status high">高</span>"#,
            Confidence::Medium => r#"<span class="status medium">中</span>"#,
            Confidence::Low => r#"<span class="status low">低</span>"#,
        };

        let evidence_html = candidate
            .evidence
            .iter()
            .map(|tag| tag.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        html.push_str(&format!(
            r#"
                <tr>
                    <td>{}</td>
                    <td><span class="type-badge">{}</span></td>
                    <td class="path">{}</td>
                    <td class="evidence">{}</td>
                </tr>
        "#,
            status_html,
            candidate.kind,
            escape_html(&candidate.full_path()),
            escape_html(&evidence_html),
        ));
    }

    html.push_str("</tbody></table>");

    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::detector::models::{Evidence, EvidenceSet};

    #[test]
    fn report_lists_candidates_and_counts() {
        let candidate = Candidate::store_key("HKEY_LOCAL_MACHINE\\SOFTWARE", "Foo", "Foo App")
            .with_evidence(EvidenceSet::single(Evidence::ExplicitPathReferenceMatch));
        let report = ScanReport::new("Foo App".to_string(), vec![candidate]);

        let html = generate_html_report(&report).unwrap();

        assert!(html.contains("Foo App"));
        assert!(html.contains("HKEY_LOCAL_MACHINE\\SOFTWARE\\Foo"));
        assert!(html.contains("ExplicitPathReferenceMatch"));
    }

    #[test]
    fn html_in_names_is_escaped() {
        let report = ScanReport::new("<script>".to_string(), vec![]);
        let html = generate_html_report(&report).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
