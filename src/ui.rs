use crate::page::Page;

pub fn single_metric_page() -> Page {
    Page::parse(&shell("Download Counter", SINGLE_METRIC_BODY))
}

pub fn project_grid_page() -> Page {
    Page::parse(&shell("Project Downloads", PROJECT_GRID_BODY))
}

pub fn project_showcase_page() -> Page {
    Page::parse(&shell("Project Showcase", PROJECT_SHOWCASE_BODY))
}

/// Only the page-wide "last updated" line, for embedding.
pub fn badge_page() -> Page {
    Page::parse(&shell("Last Update", BADGE_BODY))
}

fn shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <main class="app">
{body}
    <footer class="footer">&copy; <span id="current-year">{{{{current-year}}}}</span></footer>
  </main>
</body>
</html>
"#
    )
}

const SINGLE_METRIC_BODY: &str = r#"    <header>
      <h1>Download Counter</h1>
      <p class="subtitle">Refreshed by a scheduled job. Times are shown in the dashboard's display offset.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total downloads</span>
        <span id="current-count" class="value">{{current-count:Loading…}}</span>
      </div>
    </section>

    <p id="last-updated" class="status">{{last-updated}}</p>

    <section class="history">
      <h2>History</h2>
      <table>
        <thead>
          <tr>
            <th>#</th>
            <th>Checked at</th>
            <th>Downloads</th>
            <th>Change</th>
          </tr>
        </thead>
        <tbody id="history-body">{{history-body}}</tbody>
      </table>
    </section>
"#;

const PROJECT_GRID_BODY: &str = r#"    <header>
      <h1>Project Downloads</h1>
      <p id="global-last-updated" class="subtitle">{{global-last-updated:Loading…}}</p>
    </header>

    <section id="projects-grid" class="grid">{{projects-grid}}</section>
"#;

const PROJECT_SHOWCASE_BODY: &str = r#"    <header>
      <h1>Project Showcase</h1>
      <p id="global-last-updated" class="subtitle">{{global-last-updated:Loading…}}</p>
    </header>

    <section id="projects-grid" class="grid showcase">{{projects-grid}}</section>
"#;

const BADGE_BODY: &str = r#"    <p id="global-last-updated" class="status">{{global-last-updated:Loading…}}</p>
"#;

const STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle,
    .status {
      margin: 0;
      color: #5f5c57;
    }

    .panel,
    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .stat,
    .project-card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .label,
    .project-type {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .value,
    .project-downloads {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
      margin: 0;
    }

    .project-name {
      margin: 0;
    }

    .project-delta {
      margin: 0;
      color: var(--accent);
    }

    .project-logo {
      width: 56px;
      height: 56px;
      border-radius: 12px;
      object-fit: cover;
    }

    .project-link {
      color: var(--accent-2);
      font-weight: 600;
    }

    .placeholder {
      text-align: center;
      color: #6b645d;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      padding: 8px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      text-align: left;
    }

    .footer {
      font-size: 0.85rem;
      color: #8b857d;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::year::CURRENT_YEAR;

    #[test]
    fn templates_carry_their_dashboard_regions() {
        let pages = [
            (single_metric_page(), Dashboard::single_metric()),
            (project_grid_page(), Dashboard::project_grid()),
            (project_showcase_page(), Dashboard::project_showcase()),
        ];
        for (page, dashboard) in &pages {
            for id in dashboard.targets() {
                assert!(page.contains(id), "missing region {id}");
            }
            assert!(page.contains(CURRENT_YEAR));
        }
    }

    #[test]
    fn badge_page_has_only_the_global_region() {
        let page = badge_page();
        assert!(page.contains("global-last-updated"));
        assert!(!page.contains("projects-grid"));
    }

    #[test]
    fn stylesheet_braces_are_not_regions() {
        let html = single_metric_page().finish();
        assert!(html.contains(":root {"));
        assert!(html.contains("Loading…"));
    }
}
