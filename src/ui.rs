use crate::dashboard::{NO_CAMPAIGN_DATA_NOTICE, Notice, NoticeLevel, PageView};
use crate::presenter::{BarChart, CampaignSection, CampaignTable, ColumnKind, KpiTile, PieChart};
use std::f64::consts::PI;
use std::fmt::Write;

const SERIES_COLORS: [&str; 2] = ["#ff6b4a", "#2f4858"];
const SLICE_COLORS: [&str; 8] = [
    "#ff6b4a", "#2f4858", "#f6ae2d", "#33658a", "#86bbd8", "#9a4c95", "#55a630", "#c9184a",
];

pub fn render_index(page: &PageView) -> String {
    let fetched_at = page
        .fetched_at
        .map(|at| format!("Data as of {}", at.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_default();

    let mut body = String::new();
    body.push_str(&render_notices(&page.notices));
    if let Some(tiles) = &page.kpis {
        body.push_str(&render_tiles(tiles));
    }
    if let Some(section) = &page.campaigns {
        body.push_str(&render_campaign_section(section));
    }

    INDEX_HTML
        .replace("{{TITLE}}", &escape_html(page.title))
        .replace("{{SUBTITLE}}", &escape_html(page.subtitle))
        .replace("{{FETCHED_AT}}", &escape_html(&fetched_at))
        .replace("{{BODY}}", &body)
}

fn render_notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let class = match notice.level {
            NoticeLevel::Error => "notice error",
            NoticeLevel::Warning => "notice warning",
        };
        let _ = writeln!(
            out,
            r#"<div class="{class}" role="alert">{}</div>"#,
            escape_html(&notice.message)
        );
    }
    out
}

fn render_tiles(tiles: &[KpiTile; 4]) -> String {
    let mut out = String::from("<section class=\"tiles\">\n");
    for tile in tiles {
        let delta = tile
            .delta
            .as_deref()
            .map(|delta| {
                let class = if delta.starts_with('-') { "delta down" } else { "delta up" };
                format!(r#"<div class="{class}">{}</div>"#, escape_html(delta))
            })
            .unwrap_or_default();
        let _ = writeln!(
            out,
            r#"<div class="tile"><div class="tile-label">{}</div><div class="tile-value">{}</div>{delta}</div>"#,
            escape_html(tile.label),
            escape_html(&tile.value)
        );
    }
    out.push_str("</section>\n");
    out
}

fn render_campaign_section(section: &CampaignSection) -> String {
    let mut out = String::from("<hr class=\"divider\" />\n<h3>Campaign Performance</h3>\n");
    match section {
        CampaignSection::NoData => {
            let _ = writeln!(
                out,
                r#"<div class="notice warning">{}</div>"#,
                escape_html(NO_CAMPAIGN_DATA_NOTICE)
            );
        }
        CampaignSection::Visuals { bar, pie, table } => {
            out.push_str("<section class=\"charts\">\n");
            out.push_str(&render_bar_chart(bar));
            out.push_str(&render_pie_chart(pie));
            out.push_str("</section>\n");
            out.push_str(&render_table(table));
        }
    }
    out
}

fn render_bar_chart(chart: &BarChart) -> String {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 300.0;
    const PAD_X: f64 = 48.0;
    const PAD_BOTTOM: f64 = 40.0;
    const TOP: f64 = 24.0;

    let values = chart
        .series
        .iter()
        .flat_map(|series| series.values.iter().copied())
        .filter(|value| value.is_finite());
    let (mut min, mut max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    let plot_height = HEIGHT - TOP - PAD_BOTTOM;
    let scale = plot_height / (max - min);
    let y = |value: f64| HEIGHT - PAD_BOTTOM - (value - min) * scale;
    let zero = y(0.0);

    let groups = chart.categories.len().max(1) as f64;
    let group_width = (WIDTH - PAD_X * 2.0) / groups;
    let bar_width = group_width * 0.8 / chart.series.len().max(1) as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<figure class="chart"><figcaption>{}</figcaption><svg class="bar-chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img">"#,
        escape_html(chart.title)
    );

    for tick in 0..=4 {
        let value = min + (max - min) * f64::from(tick) / 4.0;
        let y_pos = y(value);
        let _ = writeln!(
            svg,
            r#"<line class="chart-grid" x1="{PAD_X}" y1="{y_pos:.2}" x2="{:.2}" y2="{y_pos:.2}" /><text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end">{value:.1}</text>"#,
            WIDTH - PAD_X,
            PAD_X - 8.0,
            y_pos + 4.0
        );
    }

    for (group, category) in chart.categories.iter().enumerate() {
        let group_x = PAD_X + group_width * group as f64 + group_width * 0.1;
        for (idx, series) in chart.series.iter().enumerate() {
            let value = series.values.get(group).copied().unwrap_or(0.0);
            let value = if value.is_finite() { value } else { 0.0 };
            let top = y(value).min(zero);
            let height = (y(value) - zero).abs();
            let _ = writeln!(
                svg,
                r#"<rect class="bar" data-series="{}" x="{:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{}"><title>{}: {value}</title></rect>"#,
                escape_html(series.name),
                group_x + bar_width * idx as f64,
                SERIES_COLORS[idx % SERIES_COLORS.len()],
                escape_html(category)
            );
        }
        let _ = writeln!(
            svg,
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            PAD_X + group_width * (group as f64 + 0.5),
            HEIGHT - PAD_BOTTOM + 18.0,
            escape_html(category)
        );
    }

    let _ = writeln!(
        svg,
        r#"<line class="chart-axis" x1="{PAD_X}" y1="{zero:.2}" x2="{:.2}" y2="{zero:.2}" /></svg>"#,
        WIDTH - PAD_X
    );

    svg.push_str("<ul class=\"legend\">");
    for (idx, series) in chart.series.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
            SERIES_COLORS[idx % SERIES_COLORS.len()],
            escape_html(series.name)
        );
    }
    svg.push_str("</ul></figure>\n");
    svg
}

fn render_pie_chart(chart: &PieChart) -> String {
    const SIZE: f64 = 260.0;
    const RADIUS: f64 = 110.0;
    let center = SIZE / 2.0;
    let point = |angle: f64| {
        (
            center + RADIUS * angle.sin(),
            center - RADIUS * angle.cos(),
        )
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<figure class="chart"><figcaption>{}</figcaption><svg class="pie-chart" viewBox="0 0 {SIZE} {SIZE}" role="img">"#,
        escape_html(chart.title)
    );

    let mut start = 0.0_f64;
    for (idx, slice) in chart.slices.iter().enumerate() {
        if slice.share <= 0.0 {
            continue;
        }
        let color = SLICE_COLORS[idx % SLICE_COLORS.len()];
        let title = format!("{}: {}", slice.label, slice.value);
        if slice.share >= 0.9999 {
            let _ = writeln!(
                svg,
                r#"<circle class="slice" cx="{center}" cy="{center}" r="{RADIUS}" fill="{color}"><title>{}</title></circle>"#,
                escape_html(&title)
            );
            continue;
        }

        let end = start + slice.share * 2.0 * PI;
        let (x1, y1) = point(start);
        let (x2, y2) = point(end);
        let large_arc = if slice.share > 0.5 { 1 } else { 0 };
        let _ = writeln!(
            svg,
            r#"<path class="slice" d="M {center} {center} L {x1:.2} {y1:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{color}"><title>{}</title></path>"#,
            escape_html(&title)
        );
        start = end;
    }
    svg.push_str("</svg><ul class=\"legend\">");

    for (idx, slice) in chart.slices.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<li><span class="swatch" style="background:{}"></span>{} ({:.1}%)</li>"#,
            SLICE_COLORS[idx % SLICE_COLORS.len()],
            escape_html(&slice.label),
            slice.share * 100.0
        );
    }
    svg.push_str("</ul></figure>\n");
    svg
}

fn render_table(table: &CampaignTable) -> String {
    let mut out = String::from("<table class=\"campaigns sortable\">\n<thead><tr>");
    for (idx, column) in table.columns.iter().enumerate() {
        let kind = match column.kind {
            ColumnKind::Text => "text",
            ColumnKind::Integer | ColumnKind::Currency | ColumnKind::Decimal => "number",
        };
        let _ = write!(
            out,
            r#"<th data-col="{idx}" data-kind="{kind}" aria-sort="none">{}</th>"#,
            escape_html(column.label)
        );
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(
                out,
                r#"<td data-sort="{}">{}</td>"#,
                escape_html(&cell.sort_key),
                escape_html(&cell.display)
            );
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --muted: #6b6860;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(135deg, var(--bg), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    main {
      max-width: 1200px;
      margin: 0 auto;
      padding: 32px 24px 64px;
    }

    h1 {
      font-family: "Fraunces", Georgia, serif;
      margin: 0 0 4px;
    }

    h2 {
      margin: 0 0 4px;
      font-weight: 500;
      color: var(--accent-2);
    }

    .fetched-at {
      color: var(--muted);
      font-size: 0.85rem;
      margin-bottom: 24px;
    }

    .notice {
      border-radius: 12px;
      padding: 12px 16px;
      margin: 12px 0;
    }

    .notice.error {
      background: #fde2dd;
      color: #8a1c0a;
    }

    .notice.warning {
      background: #fff3cd;
      color: #7a5b00;
    }

    .tiles {
      display: grid;
      grid-template-columns: repeat(4, minmax(0, 1fr));
      gap: 16px;
    }

    .tile,
    .chart,
    table.campaigns {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
    }

    .tile {
      padding: 18px 20px;
    }

    .tile-label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .tile-value {
      font-size: 2rem;
      font-weight: 600;
    }

    .delta {
      font-size: 0.85rem;
    }

    .delta.up {
      color: #2d7d46;
    }

    .delta.down {
      color: #b3261e;
    }

    .divider {
      border: none;
      border-top: 1px solid rgba(47, 72, 88, 0.2);
      margin: 32px 0 16px;
    }

    .charts {
      display: grid;
      grid-template-columns: 3fr 2fr;
      gap: 16px;
      margin-bottom: 24px;
    }

    .chart {
      margin: 0;
      padding: 16px;
    }

    figcaption {
      font-weight: 600;
      margin-bottom: 8px;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-axis {
      stroke: var(--accent-2);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .legend {
      list-style: none;
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      padding: 0;
      margin: 8px 0 0;
      font-size: 0.85rem;
    }

    .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 2px;
      margin-right: 6px;
    }

    table.campaigns {
      width: 100%;
      border-collapse: collapse;
      overflow: hidden;
    }

    table.campaigns th,
    table.campaigns td {
      padding: 10px 14px;
      text-align: left;
    }

    table.campaigns th {
      cursor: pointer;
      user-select: none;
      background: rgba(47, 72, 88, 0.08);
    }

    table.campaigns th[aria-sort="ascending"]::after {
      content: " ▲";
    }

    table.campaigns th[aria-sort="descending"]::after {
      content: " ▼";
    }

    table.campaigns tbody tr:nth-child(even) {
      background: rgba(47, 72, 88, 0.04);
    }

    @media (max-width: 800px) {
      .tiles,
      .charts {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main>
    <h1>{{TITLE}}</h1>
    <h2>{{SUBTITLE}}</h2>
    <div class="fetched-at">{{FETCHED_AT}}</div>
    {{BODY}}
  </main>
  <script>
    document.querySelectorAll('table.sortable').forEach((table) => {
      const headers = table.querySelectorAll('th');
      headers.forEach((th) => {
        th.addEventListener('click', () => {
          const col = Number(th.dataset.col);
          const numeric = th.dataset.kind === 'number';
          const ascending = th.getAttribute('aria-sort') !== 'ascending';
          const body = table.tBodies[0];
          const rows = Array.from(body.rows);
          rows.sort((a, b) => {
            const left = a.cells[col].dataset.sort;
            const right = b.cells[col].dataset.sort;
            const order = numeric
              ? Number(left) - Number(right)
              : left.localeCompare(right);
            return ascending ? order : -order;
          });
          headers.forEach((other) => other.setAttribute('aria-sort', 'none'));
          th.setAttribute('aria-sort', ascending ? 'ascending' : 'descending');
          rows.forEach((row) => body.appendChild(row));
        });
      });
    });
  </script>
</body>
</html>
"#;
