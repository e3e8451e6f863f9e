// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static assets compiled into the binary.

use crate::AppState;
use axum::{
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;

/// Stylesheet for every page.
pub const APP_CSS: &str = r#":root {
  --primary: #e94560;
  --dark: #1a1a2e;
  --panel: #16213e;
  --text: #eaeaea;
  --muted: #9a9ab0;
  --ok: #2ecc71;
  --warn: #f39c12;
  --bad: #e74c3c;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--dark); color: var(--text); }
.page { display: none; }
.page.active { display: block; }
.site-header, .dashboard-header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: var(--panel); }
.logo { font-size: 1.5rem; font-weight: 700; color: var(--primary); }
.hero { text-align: center; padding: 5rem 1rem; }
.inline-form { display: inline; }
button { cursor: pointer; border: 0; border-radius: 6px; padding: .5rem 1rem; }
.btn-primary { background: var(--primary); color: #fff; }
.btn-primary.active { outline: 2px solid #fff; }
.btn-secondary { background: #2a2a4a; color: var(--text); }
.btn-logout { background: transparent; color: var(--muted); }
.btn-renew, .btn-checkin { background: var(--ok); color: #fff; }
.btn-remove { background: var(--bad); color: #fff; }
.login-overlay, .modal { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, .7); align-items: center; justify-content: center; }
.login-overlay.active, .modal.active { display: flex; }
.login-box, .modal-content { background: var(--panel); padding: 2rem; border-radius: 12px; min-width: 320px; }
.login-box input, .login-box select { display: block; width: 100%; margin: .5rem 0; padding: .5rem; }
.alert { padding: .75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.alert-error { background: rgba(231, 76, 60, .2); color: var(--bad); }
.alert-info { background: rgba(46, 204, 113, .2); color: var(--ok); }
.dashboard-nav { display: flex; gap: .5rem; padding: 1rem 2rem; }
.nav-btn { background: transparent; color: var(--muted); }
.nav-btn.active { color: var(--primary); border-bottom: 2px solid var(--primary); }
.dashboard-content { padding: 1rem 2rem; }
.dashboard-section { display: none; }
.dashboard-section.active { display: block; }
.section-header { display: flex; justify-content: space-between; align-items: center; }
.clients-grid, .exercises-grid, .charts-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.client-card, .exercise-card, .chart-card, .membership-card, .nutrition-card, .client-details { background: var(--panel); border-radius: 10px; padding: 1rem; }
.client-details { display: none; margin-top: 1rem; }
.client-details.active { display: block; }
.avatar, .client-avatar { display: inline-flex; width: 40px; height: 40px; border-radius: 50%; background: var(--primary); align-items: center; justify-content: center; font-weight: 700; }
.client-email, .exercise-description, .muscle-group, .stat-label, .macro-label { color: var(--muted); }
.client-status { font-size: .85rem; padding: .2rem .5rem; border-radius: 4px; }
.status-active, .membership-status.active { color: var(--ok); }
.status-waiting-payment, .status-waiting-training, .membership-status.expiring { color: var(--warn); }
.status-inactive, .membership-status.expired { color: var(--bad); }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #2a2a4a; }
.day-tabs { display: flex; gap: .5rem; margin-bottom: 1rem; }
.exercise-item, .exercise-row { display: flex; gap: .5rem; align-items: center; padding: .5rem 0; }
.stats-summary { display: flex; gap: 2rem; margin-bottom: 1rem; }
.stat-value, .macro-value { font-size: 1.5rem; font-weight: 700; }
.empty-state { color: var(--muted); font-style: italic; }
"#;

/// Draws every chart described by the `#chartData` element.
pub const CHARTS_JS: &str = r#"(function () {
  var source = document.getElementById('chartData');
  if (!source || typeof Chart === 'undefined') {
    return;
  }
  var charts = JSON.parse(source.textContent);
  Object.keys(charts).forEach(function (id) {
    var canvas = document.getElementById(id);
    if (canvas) {
      new Chart(canvas, charts[id]);
    }
  });
})();
"#;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets/app.css", get(app_css))
        .route("/assets/charts.js", get(charts_js))
}

async fn app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

async fn charts_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        CHARTS_JS,
    )
}
