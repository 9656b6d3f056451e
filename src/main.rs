use std::env;
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geocase::input::{validate_text, validate_word};
use geocase::{Capitalizer, Category, Gazetteer, NameStore, CATALOG};

fn gazetteer_arg() -> Arg<'static, 'static> {
    Arg::with_name("gazetteer")
        .short("g")
        .long("gazetteer")
        .value_name("FILE")
        .help("Gazetteer to check names against: a JSON snapshot produced by `import`, or a GeoNames dump. Defaults to $GAZETTEER_PATH.")
        .takes_value(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = App::new("geocase")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Aleksei Voronov <despawn@gmail.com>")
        .about("Check and restore capitalization of geographic names, days, months and other proper nouns.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Correct capitalization in text, one text per line")
                .arg(gazetteer_arg())
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing texts to check, one per line. stdin by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File into which corrected texts will be written. stdout by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Write a full JSON report per line instead of the corrected text"),
                ),
        )
        .subcommand(
            SubCommand::with_name("check-word")
                .about("Check the capitalization of a single word")
                .arg(gazetteer_arg())
                .arg(
                    Arg::with_name("context")
                        .short("c")
                        .long("context")
                        .value_name("TEXT")
                        .help("Text surrounding the word, usually its sentence")
                        .takes_value(true),
                )
                .arg(Arg::with_name("word").required(true)),
        )
        .subcommand(
            SubCommand::with_name("lookup")
                .about("Describe the geographic record a name resolves to")
                .arg(gazetteer_arg())
                .arg(Arg::with_name("name").required(true)),
        )
        .subcommand(
            SubCommand::with_name("find-names")
                .about("List capitalized names whose stored form is spelled differently, one text per line")
                .arg(gazetteer_arg())
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing texts to check, one per line. stdin by default.")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("format-name")
                .about("Capitalize a phrase as a place name")
                .arg(gazetteer_arg())
                .arg(Arg::with_name("phrase").required(true)),
        )
        .subcommand(
            SubCommand::with_name("import")
                .about("Convert GeoNames dumps into a JSON gazetteer snapshot")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("GeoNames tab-separated dump, e.g. US.txt or allCountries.txt")
                        .takes_value(true)
                        .required(true)
                        .multiple(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File where the snapshot will be written")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("stats")
                .about("Show gazetteer and rule catalog statistics")
                .arg(gazetteer_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("analyze", Some(matches)) => do_analyze(matches),
        ("check-word", Some(matches)) => do_check_word(matches),
        ("lookup", Some(matches)) => do_lookup(matches),
        ("find-names", Some(matches)) => do_find_names(matches),
        ("format-name", Some(matches)) => do_format_name(matches),
        ("import", Some(matches)) => do_import(matches),
        ("stats", Some(matches)) => do_stats(matches),
        _ => unreachable!("a subcommand is required"),
    }
}

fn load_gazetteer(matches: &ArgMatches) -> Result<Gazetteer> {
    let path = matches
        .value_of_os("gazetteer")
        .map(PathBuf::from)
        .or_else(|| env::var_os("GAZETTEER_PATH").map(PathBuf::from))
        .ok_or_else(|| anyhow!("no gazetteer given, use --gazetteer or set GAZETTEER_PATH"))?;

    let gazetteer = Gazetteer::load(&path)
        .with_context(|| format!("cannot load gazetteer from {}", path.display()))?;
    info!(path = %path.display(), records = gazetteer.len(), "loaded gazetteer");

    Ok(gazetteer)
}

fn do_analyze(matches: &ArgMatches) -> Result<()> {
    let capitalizer = Capitalizer::new(load_gazetteer(matches)?);
    let as_json = matches.is_present("json");

    let input: Box<dyn BufRead> = match matches.value_of("input") {
        Some(filename) => Box::new(BufReader::new(File::open(filename)?)),
        None => Box::new(BufReader::new(stdin())),
    };

    let mut output: Box<dyn Write> = match matches.value_of("output") {
        Some(filename) => Box::new(File::create(filename)?),
        None => Box::new(stdout()),
    };

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            output.write_all(line.as_bytes())?;
            output.write_all(b"\n")?;
            continue;
        }

        validate_text(&line)?;
        let result = capitalizer.analyze(&line)?;
        if as_json {
            serde_json::to_writer(&mut output, &result)?;
        } else {
            output.write_all(result.corrected_text.as_bytes())?;
        }
        output.write_all(b"\n")?;
    }

    Ok(())
}

fn do_check_word(matches: &ArgMatches) -> Result<()> {
    // the .unwrap is safe because `word` is required
    let word = validate_word(matches.value_of("word").unwrap())?;
    let context = matches.value_of("context").unwrap_or("").trim();

    let capitalizer = Capitalizer::new(load_gazetteer(matches)?);
    let check = capitalizer.check_word(word, context)?;
    println!("{}", serde_json::to_string_pretty(&check)?);

    Ok(())
}

fn do_lookup(matches: &ArgMatches) -> Result<()> {
    let name = validate_word(matches.value_of("name").unwrap())?;
    let gazetteer = load_gazetteer(matches)?;

    match gazetteer.lookup(name)? {
        Some(record) => println!("{}", record.describe()),
        None => println!("'{}' not found", name),
    }

    Ok(())
}

fn do_find_names(matches: &ArgMatches) -> Result<()> {
    let gazetteer = load_gazetteer(matches)?;

    let input: Box<dyn BufRead> = match matches.value_of("input") {
        Some(filename) => Box::new(BufReader::new(File::open(filename)?)),
        None => Box::new(BufReader::new(stdin())),
    };

    let mut output = stdout();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        validate_text(&line)?;
        for mismatch in gazetteer.find_miscapitalized(&line)? {
            serde_json::to_writer(&mut output, &mismatch)?;
            output.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn do_format_name(matches: &ArgMatches) -> Result<()> {
    // the .unwrap is safe because `phrase` is required
    let phrase = validate_text(matches.value_of("phrase").unwrap())?;
    let gazetteer = load_gazetteer(matches)?;
    println!("{}", gazetteer.format_place_name(phrase)?);

    Ok(())
}

fn do_import(matches: &ArgMatches) -> Result<()> {
    // both .unwraps are safe because the arguments are required
    let inputs: Vec<_> = matches.values_of_os("input").unwrap().collect();
    let output = matches.value_of_os("output").unwrap();

    let gazetteer = Gazetteer::load_geonames_dump(&inputs)?;
    gazetteer.save_to_file(output)?;
    info!(records = gazetteer.len(), "wrote gazetteer snapshot");

    Ok(())
}

fn do_stats(matches: &ArgMatches) -> Result<()> {
    let gazetteer = load_gazetteer(matches)?;

    let feature_counts: serde_json::Map<_, _> = gazetteer
        .feature_counts()
        .into_iter()
        .map(|(class, count)| (class.label().to_owned(), json!(count)))
        .collect();
    let categories: serde_json::Map<_, _> = Category::ALL
        .iter()
        .map(|&category| {
            let terms = CATALOG.category(category).terms.len();
            (category.name().to_owned(), json!(terms))
        })
        .collect();

    let stats = json!({
        "total_geographic_names": gazetteer.len(),
        "feature_counts": feature_counts,
        "rule_categories": CATALOG.len(),
        "rule_terms": categories,
    });
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
