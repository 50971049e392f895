use std::io::{self, BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Train,
    Play,
    Exit,
}

pub fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "train" => Some(Choice::Train),
        "2" | "play" => Some(Choice::Play),
        "3" | "exit" => Some(Choice::Exit),
        _ => None,
    }
}

/// Show the menu until a valid choice is entered. `None` on end of input.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Choice>> {
    loop {
        writeln!(out)?;
        writeln!(out, "1. Train AI")?;
        writeln!(out, "2. Play Human")?;
        writeln!(out, "3. Exit")?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_choice(&line) {
            Some(choice) => return Ok(Some(choice)),
            None => writeln!(out, "Invalid choice.")?,
        }
    }
}
