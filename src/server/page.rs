//! Inline HTML for the dashboard page.
//!
//! One self-contained page that polls the value endpoint and renders the
//! running total with its change against the previous reading.

/// Base HTML template
fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Solfolio</title>
    <style>
        body {{ margin: 0; font-family: system-ui, sans-serif; background: #0b0e14; color: #e6e6e6;
               display: flex; align-items: center; justify-content: center; min-height: 100vh; }}
        .card {{ text-align: center; }}
        .label {{ color: #8a8f98; letter-spacing: 0.2em; text-transform: uppercase; font-size: 0.8rem; }}
        .value {{ font-size: 4rem; font-weight: 700; margin: 0.4rem 0; }}
        .delta {{ font-size: 1.1rem; }}
        .delta.up {{ color: #3fb950; }}
        .delta.down {{ color: #f85149; }}
        .stamp {{ color: #8a8f98; font-size: 0.8rem; margin-top: 1rem; }}
    </style>
</head>
<body>
    {}
</body>
</html>"#,
        title, content
    )
}

pub fn render_index() -> String {
    let content = r#"<div class="card">
        <div class="label">Portfolio value</div>
        <div class="value" id="value">$0.00</div>
        <div class="delta" id="delta"></div>
        <div class="stamp" id="stamp"></div>
    </div>
    <script>
        const fmt = new Intl.NumberFormat('en-US', {
            style: 'currency', currency: 'USD',
            minimumFractionDigits: 2, maximumFractionDigits: 2
        });

        async function refresh() {
            try {
                const resp = await fetch('/api/portfolio-value');
                const data = await resp.json();

                document.getElementById('value').textContent = fmt.format(data.value);

                const change = data.value - data.previous_value;
                const delta = document.getElementById('delta');
                if (change !== 0) {
                    delta.textContent = (change > 0 ? '▲ ' : '▼ ') + fmt.format(Math.abs(change));
                    delta.className = 'delta ' + (change > 0 ? 'up' : 'down');
                } else {
                    delta.textContent = '';
                }

                document.getElementById('stamp').textContent =
                    'as of ' + new Date(data.timestamp).toLocaleTimeString();
            } catch (e) {
                // Leave the last rendered value in place until the next poll.
            }
        }

        refresh();
        setInterval(refresh, 5000);
    </script>"#;

    base_html("Dashboard", content)
}
