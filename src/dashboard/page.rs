//! HTML rendering of the dashboard page
//!
//! The page is static apart from the layout description embedded as JSON.
//! The script connects to `/ws`, forwards control changes and draws each
//! incoming figure with `Plotly.react`.

use std::fmt::Write;

use super::DashboardLayout;

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 1200px; padding: 1.5rem; }
    h1 { text-align: center; color: #503D36; font-size: 40px; }
    select { width: 100%; padding: 0.5rem; font-size: 1rem; }
    .slider { position: relative; height: 2.5rem; }
    .slider input[type=range] { position: absolute; left: 0; width: 100%; pointer-events: none; background: none; }
    .slider input[type=range]::-webkit-slider-thumb { pointer-events: all; }
    .slider input[type=range]::-moz-range-thumb { pointer-events: all; }
    .marks { position: relative; height: 1.2rem; color: #7d8590; font-size: 0.8rem; }
    .marks span { position: absolute; transform: translateX(-50%); white-space: nowrap; }
    .readout { font-weight: 600; }
    .status { color: #7d8590; font-size: 0.8rem; text-align: right; }
"#;

const SCRIPT: &str = r#"
(function () {
  const layout = JSON.parse(document.getElementById('layout').textContent);
  const dropdown = document.getElementById('site-dropdown');
  const low = document.getElementById('payload-low');
  const high = document.getElementById('payload-high');
  const readout = document.getElementById('payload-readout');
  const status = document.getElementById('status');
  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '/ws');

  function send(message) {
    if (ws.readyState === WebSocket.OPEN) {
      ws.send(JSON.stringify(message));
    }
  }

  function showRange() {
    readout.textContent = low.value + ' - ' + high.value + ' kg';
  }

  ws.onopen = function () { status.textContent = 'connected'; };
  ws.onclose = function () { status.textContent = 'disconnected'; };
  ws.onmessage = function (event) {
    const message = JSON.parse(event.data);
    if (message.type === 'figure') {
      Plotly.react(message.chart, message.figure.data, message.figure.layout);
    } else if (message.type === 'error') {
      console.warn('dashboard:', message.message);
    }
  };

  dropdown.addEventListener('change', function () {
    send({ type: 'set_site', site: dropdown.value });
  });

  function onSlide(moved) {
    if (Number(low.value) > Number(high.value)) {
      if (moved === low) { high.value = low.value; } else { low.value = high.value; }
    }
    showRange();
    send({ type: 'set_payload_range', low: Number(low.value), high: Number(high.value) });
  }

  low.addEventListener('change', function () { onSlide(low); });
  high.addEventListener('change', function () { onSlide(high); });
  low.addEventListener('input', showRange);
  high.addEventListener('input', showRange);

  // A new connection is a new session; drop any form state the browser restored
  dropdown.value = layout.site_dropdown.value;
  low.value = layout.payload_slider.value[0];
  high.value = layout.payload_slider.value[1];
  showRange();
})();
"#;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Horizontal position of a slider mark, as a percentage of the track
fn mark_offset(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Render the complete dashboard document
pub fn render_page(layout: &DashboardLayout) -> String {
    let dropdown = &layout.site_dropdown;
    let slider = &layout.payload_slider;

    let mut options = String::new();
    for option in &dropdown.options {
        let selected = if option.value == dropdown.value {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            options,
            r#"        <option value="{}"{}>{}</option>"#,
            escape_html(&option.value),
            selected,
            escape_html(&option.label)
        );
    }

    let mut marks = String::new();
    for mark in &slider.marks {
        let _ = write!(
            marks,
            r#"<span style="left: {:.2}%">{}</span>"#,
            mark_offset(mark.value as f64, slider.min, slider.max),
            escape_html(&mark.label)
        );
    }

    let mut charts = String::new();
    for chart in &layout.charts {
        let _ = writeln!(charts, r#"    <div><div id="{}"></div></div>"#, chart.dom_id());
    }

    // Markup characters only occur inside JSON strings, so unicode escapes
    // keep the payload valid while making "</script>" impossible
    let layout_json = serde_json::to_string(layout)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly_src}"></script>
    <style>{style}</style>
</head>
<body>
    <h1>{title}</h1>
    <select id="{dropdown_id}" aria-label="{placeholder}">
{options}    </select>
    <br>
{first_chart}    <br>
    <p>{slider_label} <span id="payload-readout" class="readout"></span></p>
    <div id="{slider_id}" class="slider">
        <input id="payload-low" type="range" min="{min}" max="{max}" step="{step}" value="{low}">
        <input id="payload-high" type="range" min="{min}" max="{max}" step="{step}" value="{high}">
    </div>
    <div class="marks">{marks}</div>
{rest_charts}    <p id="status" class="status">connecting</p>
    <script id="layout" type="application/json">{layout_json}</script>
    <script>{script}</script>
</body>
</html>
"#,
        title = escape_html(&layout.title),
        plotly_src = escape_html(&layout.plotly_src),
        style = STYLE,
        dropdown_id = dropdown.id.dom_id(),
        placeholder = escape_html(&dropdown.placeholder),
        options = options,
        first_chart = charts.lines().next().map(|l| format!("{}\n", l)).unwrap_or_default(),
        slider_label = escape_html(&slider.label),
        slider_id = slider.id.dom_id(),
        min = slider.min,
        max = slider.max,
        step = slider.step,
        low = slider.value[0],
        high = slider.value[1],
        marks = marks,
        rest_charts = charts
            .lines()
            .skip(1)
            .map(|l| format!("{}\n", l))
            .collect::<String>(),
        layout_json = layout_json,
        script = SCRIPT,
    )
}
