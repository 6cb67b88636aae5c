//! Print random strings drawn from one of the preset character classes.
//!
//! One string is printed per line.  With `--seed` the output is reproducible; otherwise the
//! process-wide, time-seeded source is used.

use arrrg::CommandLine;

use randtext::{GenerationRequest, Sampler, Variant};

#[derive(Clone, Default, Debug, Eq, PartialEq, arrrg_derive::CommandLine)]
struct Options {
    #[arrrg(required, "Number of characters in each string.")]
    length: i64,
    #[arrrg(optional, "Character class (full, text, series, alpha, upper, lower).")]
    class: Option<String>,
    #[arrrg(flag, "Use lowercase letters for the alpha class.")]
    lower: bool,
    #[arrrg(optional, "Number of strings to print.")]
    count: Option<usize>,
    #[arrrg(optional, "Seed for reproducible output.")]
    seed: Option<u64>,
    #[arrrg(flag, "Print one JSON object per line.")]
    json: bool,
}

/// Combine `--class` and `--lower`.  `--lower` only modifies the alpha class.
fn resolve_class(class: Option<&str>, lower: bool) -> Result<Variant, String> {
    let class = class.unwrap_or("full");
    let variant = class.parse::<Variant>().map_err(|err| err.to_string())?;
    match (class, variant) {
        ("alpha", Variant::Alpha { .. }) => Ok(Variant::Alpha { lower }),
        (_, variant) if !lower => Ok(variant),
        (_, Variant::Alpha { lower: true }) => Ok(variant),
        (_, variant) => Err(format!(
            "--lower cannot be combined with the {variant} class\nSuggestion: Use --class alpha --lower or --class lower"
        )),
    }
}

fn emit(variant: Variant, value: &str, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "class": variant.to_string(),
                "value": value,
            })
        );
    } else {
        println!("{value}");
    }
}

fn main() {
    let (options, free) =
        Options::from_command_line_relaxed("USAGE: randtext --length N [OPTIONS]");
    if !free.is_empty() {
        eprintln!("command takes no positional arguments");
        std::process::exit(13);
    }
    let variant = match resolve_class(options.class.as_deref(), options.lower) {
        Ok(variant) => variant,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(13);
        }
    };
    let request = match GenerationRequest::new(options.length, variant) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let count = options.count.unwrap_or(1);
    match options.seed {
        Some(seed) => {
            let mut sampler = Sampler::seeded(seed);
            for _ in 0..count {
                emit(variant, &sampler.generate(&request), options.json);
            }
        }
        None => {
            for _ in 0..count {
                emit(variant, &randtext::generate(&request), options.json);
            }
        }
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
