use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("slant")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Slant Contributors")
        .about("Extract the main article text from web pages")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--pretty "Pretty print JSON output"))
        .arg(clap::arg!(--header "Prefix text output with title, source, method and word count"))
        .arg(clap::arg!(--width <COLS> "Wrap text output at this many columns (0 = no wrapping)").default_value("0"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(
            clap::arg!(--"min-text-chars" <NUM> "Minimum characters of clean text for a successful extraction (at least 100)")
                .default_value("100"),
        )
        .arg(
            clap::arg!(--"min-candidate-chars" <NUM> "Minimum characters for a semantic or class-based candidate")
                .default_value("200"),
        )
        .arg(clap::arg!(--"heuristic-threshold" <SCORE> "Score a generic container must exceed").default_value("10"))
        .arg(
            clap::arg!(--selector <CSS> "Content class selector to try, in order")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::arg!(--layout <FILE> "JSON file with viewport width and element boxes keyed by id")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "slant", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "slant", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "slant", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "slant", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
