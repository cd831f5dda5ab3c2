use numpool::RunSummary;
use std::fmt::Write;

/// Renders a finished run for a terminal.
pub fn render_text(summary: &RunSummary, saved: Option<usize>) -> String {
    let mut out = String::new();
    let counts = &summary.counts;

    let _ = writeln!(out, "Stopped:      {}", summary.cause);
    let _ = writeln!(out, "Elapsed:      {:.3}s", summary.elapsed.as_secs_f64());
    let _ = writeln!(out, "Total:        {}", counts.total);
    let _ = writeln!(out, "Odd:          {}", counts.odd);
    let _ = writeln!(out, "Even:         {}", counts.even);
    let _ = writeln!(out, "Prime:        {}", counts.prime);
    let _ = writeln!(out, "Even starts:  {}", summary.even_launches);

    for report in &summary.reports {
        let _ = writeln!(
            out,
            "  {:<5} producer: {} inserted / {} attempts",
            report.kind, report.inserted, report.attempts
        );
    }
    for fault in &summary.faults {
        let _ = writeln!(out, "  {:<5} producer FAILED: {}", fault.kind, fault.message);
    }

    if let Some(saved) = saved {
        let _ = writeln!(out, "Saved:        {saved}");
    }

    out
}

/// Renders a finished run as pretty-printed JSON.
pub fn render_json(summary: &RunSummary, saved: Option<usize>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "summary": summary,
        "saved": saved,
    }))
}
