use {
    clap::Parser,
    rtg_planner::{open_utf8_file, Arrangement, Error, Planner},
    std::process::exit,
};

/// Arguments for program execution
#[derive(Debug, Parser)]
struct Args {
    /// Input file path
    #[arg(short, long, default_value = "input/arrangement.txt")]
    input_file_path: String,

    /// The question to run, both if omitted
    #[arg(short, long, default_value_t, value_parser = clap::value_parser!(u8).range(0..=2))]
    question: u8,

    /// Print the reconstructed move sequence
    #[arg(short, long, default_value_t)]
    verbose: bool,
}

fn run_question(arrangement: &Arrangement, verbose: bool) -> Result<u32, Error> {
    let mut planner: Planner = Planner::new(arrangement)?;
    let minimum_moves: u32 = planner.minimum_moves()?;

    if verbose {
        if let Some(path) = planner.path() {
            for (index, key) in path.into_iter().enumerate() {
                println!(
                    "state {index}:\n{}",
                    key.diagram(arrangement.item_count(), arrangement.floor_count())
                );
            }
        }
    }

    Ok(minimum_moves)
}

fn run(args: &Args, arrangement: &Arrangement) -> Result<(), Error> {
    if args.question != 2_u8 {
        println!(
            "minimum moves: {}",
            run_question(arrangement, args.verbose)?
        );
    }

    if args.question != 1_u8 {
        println!(
            "minimum moves with extra pairs: {}",
            run_question(&arrangement.with_extra_pairs()?, args.verbose)?
        );
    }

    Ok(())
}

fn main() {
    let args: Args = Args::parse();

    // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're
    // done parsing it
    let result: Result<(), Error> = match unsafe {
        open_utf8_file(&args.input_file_path, |input| Arrangement::try_from(input))
    } {
        Ok(arrangement_result) => {
            arrangement_result.and_then(|arrangement| run(&args, &arrangement))
        }
        Err(error) => {
            eprintln!("failed to open UTF-8 file \"{}\": {error}", args.input_file_path);

            exit(1_i32);
        }
    };

    if let Err(error) = result {
        eprintln!("{error}");

        exit(1_i32);
    }
}
