mod logging;
mod matrix;
mod phases;
mod report;
mod result_cell;
mod types;

use std::str::FromStr;

fn parse_arg<T: FromStr>(program: &str, name: &str, value: &str) -> T {
    value
        .parse()
        .unwrap_or_else(|_| exit_with_usage(program, &format!("invalid {name} value: {value}")))
}

fn print_usage(program: &str) {
    println!("Diagonal Duet CLI");
    println!("Usage:");
    println!("  {program} [n] [seed] [lo] [hi]   (run the two-phase demo)");
    println!("  {program} bench [n] [iterations]");
    println!("  {program} --help");
    println!();
    println!("Defaults:");
    println!("  demo  n=4 seed=42 lo=1 hi=9");
    println!("  bench n=256 iterations=100");
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn main() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "diagonal_duet".to_string());
    let mut args = std::env::args().skip(1);
    let result = match args.next().as_deref() {
        Some("bench") => {
            let side = args.next().map(|v| parse_arg(&program, "n", &v));
            let iterations = args.next().map(|v| parse_arg(&program, "iterations", &v));
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("bench: unexpected argument: {extra}"));
            }
            phases::run_benchmark(side, iterations)
        }
        Some("--help") | Some("-h") | Some("help") => {
            print_usage(&program);
            return;
        }
        Some(value) => {
            let side = parse_arg(&program, "n", value);
            let seed = args.next().map(|v| parse_arg(&program, "seed", &v));
            let lo = args.next().map(|v| parse_arg(&program, "lo", &v));
            let hi = args.next().map(|v| parse_arg(&program, "hi", &v));
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("unexpected argument: {extra}"));
            }
            phases::run_demo(Some(side), seed, lo, hi)
        }
        None => phases::run_demo(None, None, None, None),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
