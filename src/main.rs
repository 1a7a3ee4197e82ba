use std::fs;
use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use cplusminus::{compile_into, JavaSourceSink, Lexer, MatchPolicy, MemorySink};

const USAGE: &str = "Usage: cplusminus <input.txt> [-o <Main.java>] [--first-match] [--print]";

#[derive(StructOpt, Debug)]
#[structopt(name = "cplusminus", about = "Compiles C+- source into a Java entry point")]
struct Opt {
    /// Path of the source file (must end in .txt)
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Where to write the generated Java source (defaults to Main.java next to the input)
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Use the legacy first-match lexing policy instead of longest-match
    #[structopt(long)]
    first_match: bool,

    /// Print the generated method body to stdout instead of writing a file
    #[structopt(long)]
    print: bool,
}

fn main() {
    env_logger::init();

    let opt = Opt::from_args();

    if opt.input.extension().and_then(|e| e.to_str()) != Some("txt") {
        eprintln!("{USAGE}");
        process::exit(2);
    }

    let src = match fs::read_to_string(&opt.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read input file {}: {e}", opt.input.display());
            process::exit(2);
        }
    };

    let policy = if opt.first_match {
        MatchPolicy::FirstMatch
    } else {
        MatchPolicy::LongestMatch
    };
    let lexer = Lexer::new(policy);

    let result = if opt.print {
        let mut sink = MemorySink::default();
        compile_into(&src, &lexer, &mut sink).map(|()| {
            if let Some(body) = sink.body {
                println!("{body}");
            }
        })
    } else {
        let output = opt
            .output
            .unwrap_or_else(|| opt.input.with_file_name("Main.java"));
        compile_into(&src, &lexer, &mut JavaSourceSink::new(output))
    };

    if let Err(e) = result {
        eprintln!("{} error!\n{e}", e.stage());
        process::exit(1);
    }
}
