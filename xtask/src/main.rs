use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

const CORE: &str = "geomeasure-core";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct PrecommitOptions {
    /// Also run doctests, build the benchmarks and render docs.
    full: bool,
    /// Refuse to touch the lockfile.
    ci: bool,
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let Some(cmd) = args.next() else {
        print_usage();
        return Err("missing command".to_string());
    };

    match cmd.as_str() {
        "precommit" => {
            let mut opts = PrecommitOptions::default();
            for arg in args {
                match arg.as_str() {
                    "--full" => opts.full = true,
                    "--ci" => opts.ci = true,
                    _ => return Err(format!("unknown precommit flag: {arg}")),
                }
            }
            precommit(opts)
        }
        "install-hooks" => install_hooks(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Err(format!("unknown command: {cmd}"))
        }
    }
}

fn print_usage() {
    eprintln!("xtask commands:");
    eprintln!("  precommit [--full] [--ci]   fmt, clippy and tests for {CORE}");
    eprintln!("  install-hooks               run precommit from .git/hooks/pre-commit");
}

fn repo_root() -> Result<PathBuf, String> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "xtask must live inside the workspace".to_string())
}

fn precommit_steps(opts: PrecommitOptions) -> Vec<Vec<&'static str>> {
    let mut test = vec!["cargo", "test", "--workspace"];
    if opts.ci {
        test.push("--locked");
    }
    let mut steps = vec![
        vec!["cargo", "fmt", "--all", "--", "--check"],
        vec![
            "cargo",
            "clippy",
            "-p",
            CORE,
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
        test,
    ];
    if opts.full {
        steps.extend([
            vec!["cargo", "test", "-p", CORE, "--doc"],
            vec!["cargo", "bench", "-p", CORE, "--no-run"],
            vec!["cargo", "doc", "-p", CORE, "--no-deps"],
        ]);
    }
    steps
}

fn precommit(opts: PrecommitOptions) -> Result<(), String> {
    let root = repo_root()?;
    for step in precommit_steps(opts) {
        run_step(&root, &step)?;
    }
    Ok(())
}

fn run_step(cwd: &Path, args: &[&str]) -> Result<(), String> {
    let (bin, rest) = args
        .split_first()
        .ok_or_else(|| "empty command step".to_string())?;
    eprintln!("+ {}", args.join(" "));

    let status = Command::new(bin)
        .args(rest)
        .current_dir(cwd)
        .status()
        .map_err(io_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {}", args.join(" ")))
    }
}

fn install_hooks() -> Result<(), String> {
    let root = repo_root()?;
    let hook_path = root.join(".git/hooks/pre-commit");
    let script = format!(
        "#!/usr/bin/env sh\nset -eu\ncd \"{}\"\ncargo run --quiet -p xtask -- precommit\n",
        root.display()
    );

    if let Some(parent) = hook_path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&hook_path, script).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path).map_err(io_err)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms).map_err(io_err)?;
    }

    println!("installed pre-commit hook at {}", hook_path.display());
    Ok(())
}

fn io_err(e: io::Error) -> String {
    e.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ci_locks_the_test_step() {
        let steps = precommit_steps(PrecommitOptions {
            full: false,
            ci: true,
        });
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].last(), Some(&"--locked"));
    }

    #[test]
    fn full_adds_doc_and_bench_steps() {
        let steps = precommit_steps(PrecommitOptions {
            full: true,
            ci: false,
        });
        assert!(steps.iter().any(|s| s.contains(&"bench")));
        assert!(steps.iter().all(|s| s.first() == Some(&"cargo")));
    }
}
