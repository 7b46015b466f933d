//! The checker fixture tests.
//!
//! This test looks for directories in `tests/check`. Each directory is
//! expected to contain:
//!
//! * `source.c` - the input source to check.
//! * `source.diagnostics` - the report-mode violation messages, one per
//!   line, in source order.
//! * `source.fixed` - the expected output of fix mode.
//!
//! Both result files may be regenerated by setting the `BLESS` environment
//! variable when running this test.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::exit;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use cfmt_check::check;
use colored::Colorize;
use rayon::prelude::*;

fn find_tests() -> Vec<PathBuf> {
    let mut filter = std::collections::HashSet::new();
    for arg in std::env::args().skip_while(|a| a != "--").skip(1) {
        if !arg.starts_with('-') {
            filter.insert(arg);
        }
    }

    let mut tests: Vec<PathBuf> = Vec::new();
    for entry in Path::new("tests/check").read_dir().unwrap() {
        let entry = entry.expect("failed to read directory");
        let path = entry.path();
        if !path.is_dir()
            || (!filter.is_empty()
                && !filter.contains(entry.file_name().to_str().expect("name should be UTF-8")))
        {
            continue;
        }

        tests.push(path);
    }

    tests.sort();
    tests
}

fn compare_result(path: &Path, result: &str) -> Result<(), String> {
    if env::var_os("BLESS").is_some() {
        fs::write(path, result).map_err(|e| {
            format!("failed to write result file `{path}`: {e}", path = path.display())
        })?;
        return Ok(());
    }

    let expected = fs::read_to_string(path)
        .map_err(|e| {
            format!("failed to read result file `{path}`: {e}", path = path.display())
        })?
        .replace("\r\n", "\n");

    if expected != result {
        return Err(format!(
            "result is not as expected:\n{}",
            pretty_assertions::StrComparison::new(&expected, result),
        ));
    }

    Ok(())
}

fn run_test(test: &Path) -> Result<(), String> {
    let source_path = test.join("source.c");
    let source = fs::read_to_string(&source_path).map_err(|e| {
        format!("failed to read source file `{path}`: {e}", path = source_path.display())
    })?;

    let reported = check(&source, false);
    let messages = reported
        .diagnostics
        .iter()
        .map(|d| format!("{}\n", d.message()))
        .collect::<String>();
    compare_result(test.join("source.diagnostics").as_path(), &messages)?;

    let fixed = check(&source, true)
        .fixed
        .expect("fix mode always produces text");
    compare_result(test.join("source.fixed").as_path(), &fixed)?;

    // Fixing already-fixed source must be a byte-for-byte no-op (idempotence).
    // Not every violation is fixable (a too-long line is reported but never
    // rewritten), so this checks idempotence of the fix itself, not that a
    // second report pass comes back clean.
    let refixed = check(&fixed, true).fixed.expect("fix mode always produces text");
    if refixed != fixed {
        return Err(format!(
            "fixing the fixed output is not idempotent:\n{}",
            pretty_assertions::StrComparison::new(&fixed, &refixed),
        ));
    }

    Ok(())
}

fn main() {
    let tests = find_tests();
    println!("\nrunning {} tests\n", tests.len());

    let ntests = AtomicUsize::new(0);
    let errors = tests
        .par_iter()
        .filter_map(|test| {
            let test_name = test.file_stem().and_then(OsStr::to_str).unwrap();
            ntests.fetch_add(1, Ordering::SeqCst);
            match run_test(test)
                .map_err(|e| format!("failed to run test `{path}`: {e}", path = test.display()))
                .err()
            {
                Some(e) => {
                    println!("test {test_name} ... {failed}", failed = "failed".red());
                    Some((test_name, e))
                }
                None => {
                    println!("test {test_name} ... {ok}", ok = "ok".green());
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if !errors.is_empty() {
        eprintln!("\n{count} test(s) {failed}:", count = errors.len(), failed = "failed".red());
        for (name, msg) in errors.iter() {
            eprintln!("{name}: {msg}", msg = msg.red());
        }
        exit(1);
    }

    println!("\ntest result: ok. {} passed\n", ntests.load(Ordering::SeqCst));
}
