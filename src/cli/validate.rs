use plugcheck::{report, Config, Family, PlugcheckError, ValidationRun};

/// Run one family against the current directory.
pub(crate) fn run(family: Family) -> i32 {
    match execute(family) {
        Ok(run) => run.exit_code(),
        Err(e) => {
            eprintln!("plugcheck {family}: {e}");
            1
        }
    }
}

/// Run every family; a family-level failure does not stop the rest.
pub(crate) fn run_all() -> i32 {
    let mut code = 0;
    for family in Family::ALL {
        let family_code = run(family);
        code = code.max(family_code);
    }
    code
}

fn execute(family: Family) -> Result<ValidationRun, PlugcheckError> {
    let config = Config::from_current_dir()?;
    let run = plugcheck::run(family, &config)?;
    report::print(family, &run)?;
    Ok(run)
}
