pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod utils;

use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    parser::prelude::{parse_source, parse_source_from_stream, Program},
    utils::prelude::Error
};

/// Reads a whole source file into memory and parses it.
pub fn parse_file(path: PathBuf) -> Result<Program, Error> {
    let src = std::fs::read_to_string(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let (program, errors) = parse_source(&src);

    if !errors.is_empty() {
        return Err(Error::Parse { path, src, errors });
    }

    Ok(program)
}

/// Parses a source file without reading it up front: characters stream
/// from the reader straight into the lexer. The text is still collected
/// on the side so parse errors can be rendered against it.
pub fn parse_file_from_stream(path: PathBuf) -> Result<Program, Error> {
    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?
        .len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars()
        .map_while(|c| c.ok())
        .map(|c| {
            src.push(c);
            c
        });

    let (program, errors) = parse_source_from_stream(stream);

    if !errors.is_empty() {
        return Err(Error::Parse { path, src, errors });
    }

    Ok(program)
}
