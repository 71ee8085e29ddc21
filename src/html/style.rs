pub const STYLESHEET: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "PingFang SC", "Microsoft YaHei", sans-serif;
    background: #f5f7fa;
    color: #263238;
}
.container { max-width: 1280px; margin: 0 auto; padding: 24px; }
.header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    border-bottom: 2px solid #2196f3;
    margin-bottom: 24px;
}
.lang-switch button {
    border: 1px solid #2196f3;
    background: #fff;
    color: #2196f3;
    padding: 6px 14px;
    cursor: pointer;
    border-radius: 4px;
}
.lang-switch button.active { background: #2196f3; color: #fff; }
.summary-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 16px;
    margin-bottom: 24px;
}
.card {
    background: #fff;
    border-radius: 8px;
    padding: 16px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12);
}
.card h3 { margin-top: 0; color: #546e7a; font-size: 1rem; }
.metric-value { font-size: 1.6rem; font-weight: 600; margin: 8px 0; }
.metric-label { color: #78909c; margin: 0; }
.status-bottleneck { color: #e53935; font-weight: 600; }
.status-clear { color: #43a047; font-weight: 600; }
.reason { color: #546e7a; font-size: 0.9rem; }
.section {
    background: #fff;
    border-radius: 8px;
    padding: 16px;
    margin-bottom: 24px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12);
    overflow-x: auto;
}
.chart-container { position: relative; height: 420px; }
table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
th, td { border: 1px solid #e0e0e0; padding: 6px 8px; text-align: center; }
th { background: #eceff1; }
tr.recommended td { background: #e3f2fd; font-weight: 600; }
.footer { color: #90a4ae; font-size: 0.8rem; text-align: right; }
"#;
