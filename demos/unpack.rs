use std::env;
use std::fs;
use std::io::Cursor;

use gwkit::Result;
use gwkit::formats::cheese::{self, Cheese};

fn main() -> Result<()> {
    let path = env::args().nth(1).expect("usage: unpack <game.bin>");
    let data = fs::read(&path)?;

    let Some(offset) = cheese::find_magic(&data) else {
        eprintln!("{path}: no embedded directory");
        std::process::exit(1);
    };
    println!("directory found at {offset:#x}");

    let block = Cheese::parse(&mut Cursor::new(&data), offset as u64)?;
    for file in &block.files {
        println!("* {} ({} bytes)", file.name, file.data.len());
    }

    Ok(())
}
