use std::fmt::Write;

use crate::notice::NoticeKind;
use crate::state::Snapshot;

/// Plain-text rendering of a snapshot. Pure: same snapshot, same text.
pub fn render_text(s: &Snapshot) -> String {
    let mut out = String::new();
    if let Some(n) = &s.notice {
        let tag = match n.kind {
            NoticeKind::Ok => "ok",
            NoticeKind::Warn => "warn",
            NoticeKind::Err => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", n.text);
    }

    let _ = writeln!(out, "Service types ({})", s.types.len());
    for t in &s.types {
        let _ = writeln!(out, "  - {}", t.name);
    }

    let _ = writeln!(out, "Tariffs ({})", s.tariffs.len());
    for t in &s.tariffs {
        let marker = if s.selected == Some(t.id) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {} [{} services]", t.name, t.services.len());
        if s.selected != Some(t.id) {
            continue;
        }
        if t.services.is_empty() {
            let _ = writeln!(out, "    (no services)");
        }
        for svc in &t.services {
            // the types list is fresher than the name embedded in the service
            let type_name = s.type_name(svc.type_id).unwrap_or(&svc.service_type.name);
            let _ = writeln!(out, "    {type_name}: {} {}", svc.value, svc.unit);
        }
    }
    out
}
