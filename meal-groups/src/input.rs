use std::io::{self, BufRead};

/// Words that end terminal input early when typed alone on a line.
const STOP_WORDS: [&str; 2] = ["FIN", "END"];

/// Reads a pasted message line by line.
///
/// Stops at end of input, at a line holding only a stop word, or at the
/// second blank line in a row. The result is trimmed.
pub fn read_message<R: BufRead>(reader: R) -> io::Result<String> {
    let mut lines = Vec::new();
    let mut blank_run = 0;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if STOP_WORDS.contains(&trimmed) {
            break;
        }
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    Ok(lines.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stops_at_double_blank() {
        let input = "TODO:\n- Ana\n\n- Cena 9\n- Bea\n\n\n- Comida 9\n- Carl\n";
        let text = read_message(Cursor::new(input)).unwrap();
        assert_eq!(text, "TODO:\n- Ana\n\n- Cena 9\n- Bea");
    }

    #[test]
    fn test_stops_at_stop_word() {
        let text = read_message(Cursor::new("TODO:\n- Ana\n FIN \n- Bea\n")).unwrap();
        assert_eq!(text, "TODO:\n- Ana");
    }

    #[test]
    fn test_reads_to_eof() {
        let text = read_message(Cursor::new("TODO:\n- Ana")).unwrap();
        assert_eq!(text, "TODO:\n- Ana");
        assert_eq!(read_message(Cursor::new("")).unwrap(), "");
    }
}
