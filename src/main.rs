use std::fs;
use std::process::ExitCode;

use clap::Parser;

use smol_disasm::bitmap::ValidityBitmap;
use smol_disasm::cli::{build_registry, Cli, Markers};
use smol_disasm::driver::{print_active_extensions, Session, BUILTIN_TEST_DATA};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let registry = match build_registry(&cli) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("smol-disasm: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.verbose {
        let stdout = std::io::stdout();
        let _ = print_active_extensions(&registry, &mut stdout.lock());
    }

    let bitmap = ValidityBitmap::compute(&registry);
    let markers = Markers::from_cli(&cli);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.files.is_empty() {
        let mut session = Session::new(BUILTIN_TEST_DATA, &bitmap);
        let _ = session.run(&markers, &mut out);
        return ExitCode::SUCCESS;
    }

    for path in &cli.files {
        let buf = match fs::read(path) {
            Ok(buf) => buf,
            Err(e) => {
                eprintln!("smol-disasm: {path}: {e}");
                continue;
            }
        };
        let mut session = Session::new(&buf, &bitmap);
        let _ = session.run(&markers, &mut out);
    }

    ExitCode::SUCCESS
}
