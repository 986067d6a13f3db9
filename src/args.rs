use clap::{Arg, Command};

pub fn prep_args() -> clap::ArgMatches {
    Command::new("fuzzdex-prep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a keyword index and write it to standard output")
        .arg(
            Arg::new("keywords")
                .help("Keyword file, one 15-character keyword per line")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .get_matches()
}

pub fn search_args() -> clap::ArgMatches {
    Command::new("fuzzdex-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Answer approximate-membership queries against a prepared index")
        .arg(
            Arg::new("queries")
                .help("Query file, one 15-character query per line")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("index")
                .help("Index file produced by fuzzdex-prep")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("distance")
                .short('k')
                .long("distance")
                .help("Maximum edit distance (0-3)")
                .default_value("3")
                .value_parser(clap::value_parser!(u32).range(0..=3)),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .help("Worker threads for the query batch (1 = serial)")
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches()
}

pub fn perf_args() -> clap::ArgMatches {
    Command::new("fuzzdex-perf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time query batches and append the results to CSV records")
        .arg(
            Arg::new("index")
                .help("Index file produced by fuzzdex-prep")
                .required(true)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("queries")
                .help("Query files, one 15-character query per line")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("distance")
                .short('k')
                .long("distance")
                .help("Maximum edit distance (0-3)")
                .default_value("3")
                .value_parser(clap::value_parser!(u32).range(0..=3)),
        )
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .help("Dataset name override (default: derived from each query file name)")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("records-dir")
                .long("records-dir")
                .help("Directory for CSV records")
                .default_value("records")
                .value_parser(clap::value_parser!(String)),
        )
        .get_matches()
}
