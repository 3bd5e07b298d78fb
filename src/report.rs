//! Human-readable rendering of validation runs.
//!
//! Each issue goes to the error stream as `ERROR: plugin/kind/file - message`;
//! one summary line goes to the output stream.

use std::io::{self, Write};

use crate::orchestrator::Family;
use crate::run::ValidationRun;

/// Summary line for one family's run.
///
/// `Validated 3 agent files across 2 plugins` when clean, with
/// `, found 1 error` appended otherwise.
#[must_use]
pub fn summary(family: Family, run: &ValidationRun) -> String {
    let kind = family.kind();
    let examined = run.examined_count(kind);
    let plugins = run.plugin_count();
    let mut line = format!(
        "Validated {examined} {} across {plugins} {}",
        kind.noun(examined),
        plural(plugins, "plugin", "plugins"),
    );
    let errors = run.issues().len();
    if errors > 0 {
        line.push_str(&format!(
            ", found {errors} {}",
            plural(errors, "error", "errors")
        ));
    }
    line
}

/// Write every issue to `err` and the summary to `out`.
pub fn write_report<O: Write, E: Write>(
    family: Family,
    run: &ValidationRun,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for issue in run.issues() {
        writeln!(err, "ERROR: {issue}")?;
    }
    writeln!(out, "{}", summary(family, run))
}

/// Report a run on the process's standard streams.
pub fn print(family: Family, run: &ValidationRun) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    write_report(family, run, &mut stdout.lock(), &mut stderr.lock())
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}
