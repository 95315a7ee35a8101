//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - compression-model circuits verified by a swap test",
        style("qcompress").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcompress-ir     Register-aware circuit IR");
    println!("  qcompress-qasm3  OpenQASM 3/2 parser and emitter");
    println!("  qcompress-model  Compression-model builder and swap test");
    println!("  qcompress-cli    Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
