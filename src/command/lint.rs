//! Lint command implementation.
use color_eyre::eyre::WrapErr;
use log::*;
use std::{fs, path::Path};

use crate::{
    changelog::{Changelog, Linter},
    cli::{Args, OutputFormat},
    config::{Config, LinterConfig},
    error::LintError,
    report::Report,
    result::Result,
};

/// Lint the changelog named in `args` and return the process exit code.
///
/// Problems in the changelog are not errors: they are printed and turn the
/// exit code to 1. Errors are reserved for configuration and I/O failures.
pub fn execute(args: &Args) -> Result<i32> {
    if !args.changelog.is_file() {
        error!("changelog not found: {}", args.changelog.display());
        return Ok(1);
    }

    let repo_root = args.repo_root();
    debug!("using repository root: {}", repo_root.display());

    let config = Config::discover(&repo_root, args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    let linter_config = LinterConfig::resolve(&config, &repo_root)?;

    let changelog = Linter::new(&linter_config).lint_file(&args.changelog)?;
    let report = Report::new(&args.changelog, &changelog.problems);

    match args.format {
        OutputFormat::Human => print!("{}", report.render()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&changelog.to_json())?;
            println!("{json}");
        }
    }

    if let Some(out) = &args.fixed_output {
        write_fixed(&changelog, &args.changelog, out)?;
    }

    if report.is_clean() {
        info!("no problems found in {}", args.changelog.display());
    }

    Ok(report.exit_code())
}

fn write_fixed(changelog: &Changelog, input: &Path, out: &Path) -> Result<()> {
    if out == Path::new("-") {
        print!("{}", changelog.fixed());
        return Ok(());
    }

    let input_path = fs::canonicalize(input)?;

    if fs::canonicalize(out).is_ok_and(|p| p == input_path) {
        return Err(
            LintError::InPlaceRewrite(out.display().to_string()).into()
        );
    }

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    info!("writing corrected changelog to: {}", out.display());
    fs::write(out, changelog.fixed())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CLEAN: &str = "# Changelog\n\n## Unreleased\n\n### Bug Fixes\n\n- (deps) [#10](https://github.com/evmos/evmos/pull/10) Fix it.\n";

    const DIRTY: &str = "## Unreleased\n\n### bug fixes\n\n- (deps) [#10](https://github.com/evmos/evmos/pull/10) fix it\n";

    fn args_for(changelog: PathBuf, fixed_output: Option<PathBuf>) -> Args {
        Args {
            changelog,
            repo_root: None,
            config: None,
            format: OutputFormat::Human,
            fixed_output,
            debug: false,
        }
    }

    fn write_changelog(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, content).unwrap();
        path
    }

    #[test_log::test]
    fn clean_changelog_exits_zero() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, CLEAN);

        let code = execute(&args_for(path, None)).unwrap();

        assert_eq!(code, 0);
    }

    #[test_log::test]
    fn problems_exit_one() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, DIRTY);

        let code = execute(&args_for(path, None)).unwrap();

        assert_eq!(code, 1);
    }

    #[test_log::test]
    fn missing_changelog_exits_one() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("CHANGELOG.md");

        let code = execute(&args_for(path, None)).unwrap();

        assert_eq!(code, 1);
    }

    #[test]
    fn json_output_still_reports_exit_code() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, DIRTY);
        let args = Args {
            format: OutputFormat::Json,
            ..args_for(path, None)
        };

        assert_eq!(execute(&args).unwrap(), 1);
    }

    #[test]
    fn writes_corrected_changelog() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, DIRTY);
        let out = tmp_dir.path().join("fixed").join("CHANGELOG.md");

        execute(&args_for(path, Some(out.clone()))).unwrap();

        let fixed = fs::read_to_string(&out).unwrap();
        assert_eq!(
            fixed,
            "## Unreleased\n\n### Bug Fixes\n\n- (deps) [#10](https://github.com/evmos/evmos/pull/10) Fix it.\n"
        );

        let code = execute(&args_for(out, None)).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, DIRTY);

        let result = execute(&args_for(path.clone(), Some(path.clone())));

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LintError>(),
            Some(LintError::InPlaceRewrite(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), DIRTY);
    }

    #[test]
    fn reads_config_from_repo_root() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(
            &tmp_dir,
            "## Unreleased\n\n### Bug Fixes\n\n- (custom) [#10](https://github.com/evmos/evmos/pull/10) Fix it.\n",
        );

        assert_eq!(execute(&args_for(path.clone(), None)).unwrap(), 1);

        fs::write(
            tmp_dir.path().join(".changelog-lint.toml"),
            "extra_categories = [\"custom\"]\n",
        )
        .unwrap();

        assert_eq!(execute(&args_for(path, None)).unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_changelog(&tmp_dir, CLEAN);
        let config = tmp_dir.path().join("lint.toml");
        fs::write(&config, "legacy_version = \"twelve\"\n").unwrap();

        let args = Args {
            config: Some(config),
            ..args_for(path, None)
        };

        assert!(execute(&args).is_err());
    }
}
