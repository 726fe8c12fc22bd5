//! Render a demo report to stdout with the stock ANSI scheme.
//!
//! Run with `RUST_LOG=core_layout=debug` to watch the planner's
//! drop/clamp decisions.

use marginalia::{AnsiScheme, Config, Kind, ReportBuilder};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    ReportBuilder::new(Kind::Error)
        .with_config(Config::new().with_limit_width(100))
        .with_source((
            "let apple = orange + 1;\nlet orange = \"🍊\";\n",
            "demo.rs",
        ))
        .with_code("E0425")
        .with_title("cannot find value `orange` in this scope")
        .with_location(0, 12)
        .with_label(12..18)
        .with_message("not found in this scope")
        .with_label(28..34)
        .with_message("defined here, after its first use")
        .with_help("move the definition above its first use")
        .with_note("bindings are not hoisted")
        .with_scheme(AnsiScheme)
        .render_to_stdout()?;

    Ok(())
}
