extern crate ox669;
extern crate getopts;

use std::env;
use std::error::Error;
use std::fs;
use getopts::{Matches, Options};
use ox669::{LoadOptions, Song};

fn main() {

    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();

    opts.optflag("h", "help", "display usage information and exit");
    opts.optflag("n", "no-samples", "don't load sample data");
    opts.optopt("p", "pattern", "display the given pattern", "NUM");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    if matches.opt_present("h") || matches.free.len() < 1 {
        let brief = format!("Usage: {} [options] filename", args[0]);
        print!("{}", opts.usage(&brief));
        return;
    }

    match run(&matches) {
        Ok(_)  => {},
        Err(e) => println!("Error: {}", e),
    }
}

fn run(matches: &Matches) -> Result<(), Box<dyn Error>> {
    let name = &matches.free[0];
    let data = fs::read(name)?;

    let info = ox669::probe(&data)?;
    println!("Format : {}", info.description);

    let opts = LoadOptions {
        no_samples: matches.opt_present("n"),
    };
    let song = ox669::load(&data, &opts)?;

    println!("Title  : {}", song.title);
    println!("Tracker: {}", song.tracker_id);
    println!("Speed  : {} / Tempo: {}", song.initial_speed, song.initial_tempo);
    println!("Message:");
    for line in song.message.lines() {
        println!("  {}", line);
    }

    println!("Samples:");
    for (i, smp) in song.samples.iter().enumerate().skip(1) {
        println!("{:3}: {:13} {:6} {:6} {:6} {}",
            i, smp.name, smp.length, smp.loop_start, smp.loop_end,
            if smp.has_loop { 'L' } else { ' ' });
    }

    let orders = song.orderlist[..song.num_orders()].iter()
        .map(|x| format!("{}", x)).collect::<Vec<String>>();
    println!("Orders : {}", orders.join(" "));
    println!("Patterns: {}", song.num_patterns());

    if let Some(num) = matches.opt_str("p") {
        show_pattern(&song, num.parse()?);
    }

    Ok(())
}

fn show_pattern(song: &Song, num: usize) {
    let pat = match song.pattern(num) {
        Some(p) => p,
        None    => {
            println!("Pattern {} not found", num);
            return
        }
    };

    println!("Pattern {}:", num);
    for r in 0..pat.rows() {
        print!("{:3}: ", r);
        for c in 0..8 {
            print!("{}  ", pat.note(r, c))
        }
        println!();
    }
}
