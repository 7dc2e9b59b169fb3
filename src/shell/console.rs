use std::io::{BufRead, Write};
use std::sync::LazyLock;
use ordered_float::OrderedFloat;
use regex::Regex;
use crate::common::error::{InventoryError, Result};
use crate::common::vehicle::{Color, Price};
use crate::inventory::SortKey;

static INT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());
static COMPONENTS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z ]+,)*[A-Z ]+$").unwrap());

/// Line-oriented prompt over an input stream and an output sink
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn println(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Next line without its line ending, `None` at end of input.
    /// A line that is not UTF-8 is consumed and reported as invalid input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }

        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| InventoryError::invalid_input("input is not valid UTF-8"))
    }

    /// Print a message and read the answer
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        self.println(message)?;
        self.read_line()?
            .ok_or_else(|| InventoryError::invalid_input("no more input"))
    }

    pub fn read_int(&mut self, message: &str) -> Result<u32> {
        let data = self.prompt(message)?;
        if !INT_PATTERN.is_match(&data) {
            return Err(InventoryError::invalid_input(format!("INT VALUE IS NOT CORRECT: {}", data)));
        }

        data.parse()
            .map_err(|_| InventoryError::invalid_input(format!("INT VALUE IS TOO LARGE: {}", data)))
    }

    pub fn read_string(&mut self, message: &str, pattern: &Regex) -> Result<String> {
        let data = self.prompt(message)?;
        if !pattern.is_match(&data) {
            return Err(InventoryError::invalid_input(format!("STRING VALUE IS NOT CORRECT: {}", data)));
        }
        Ok(data)
    }

    pub fn read_decimal(&mut self, message: &str) -> Result<Price> {
        let data = self.prompt(message)?;
        if !DECIMAL_PATTERN.is_match(&data) {
            return Err(InventoryError::invalid_input(format!("DECIMAL VALUE IS NOT CORRECT: {}", data)));
        }

        data.parse::<f64>()
            .map(OrderedFloat)
            .map_err(|_| InventoryError::invalid_input(format!("DECIMAL VALUE IS NOT CORRECT: {}", data)))
    }

    /// Comma separated component names
    pub fn read_components(&mut self) -> Result<Vec<String>> {
        let text = self.prompt("Enter components names separating them by comma")?;
        if !COMPONENTS_PATTERN.is_match(&text) {
            return Err(InventoryError::invalid_input(format!("COMPONENTS ARE NOT CORRECT: {}", text)));
        }

        Ok(text.split(',').map(String::from).collect())
    }

    /// Anything starting with `y` means yes
    pub fn read_bool(&mut self, message: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{} [y/n?]", message))?;
        Ok(answer.starts_with('y'))
    }

    pub fn read_color(&mut self) -> Result<Color> {
        for (i, color) in Color::ALL.iter().enumerate() {
            self.println(format!("{}. {}", i + 1, color))?;
        }
        self.prompt("Enter color:")?.parse()
    }

    pub fn read_sort_key(&mut self) -> Result<SortKey> {
        for (i, key) in SortKey::ALL.iter().enumerate() {
            self.println(format!("{}. {}", i + 1, key))?;
        }
        self.prompt("Enter sort type:")?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorCode;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut console = console("BMW\r\nAUDI\n");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("BMW"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("AUDI"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_line_rejects_invalid_utf8() {
        let mut console = Console::new(Cursor::new(b"\xff\xfe\nBMW\n".to_vec()), Vec::new());
        let err = console.read_line().unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidInput);
        assert!(err.is_recoverable());
        // The bad line is consumed
        assert_eq!(console.read_line().unwrap().as_deref(), Some("BMW"));
    }

    #[test]
    fn test_prompt_at_end_of_input() {
        let err = console("").prompt("Enter X:").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidInput);
    }

    #[test]
    fn test_read_int() {
        assert_eq!(console("2500\n").read_int("Enter X:").unwrap(), 2500);
        assert!(console("-5\n").read_int("Enter X:").is_err());
        assert!(console("12a\n").read_int("Enter X:").is_err());
        assert!(console("99999999999\n").read_int("Enter X:").is_err());
    }

    #[test]
    fn test_read_decimal() {
        assert_eq!(console("125.50\n").read_decimal("Price:").unwrap(), OrderedFloat(125.5));
        assert_eq!(console("7\n").read_decimal("Price:").unwrap(), OrderedFloat(7.0));
        assert!(console("1.234\n").read_decimal("Price:").is_err());
        assert!(console("abc\n").read_decimal("Price:").is_err());
    }

    #[test]
    fn test_read_components() {
        assert_eq!(console("ABS,AIR CON\n").read_components().unwrap(), vec!["ABS", "AIR CON"]);
        assert!(console("ABS,\n").read_components().is_err());
        assert!(console("abs\n").read_components().is_err());
    }

    #[test]
    fn test_read_bool() {
        assert!(console("yes\n").read_bool("Descending?").unwrap());
        assert!(!console("n\n").read_bool("Descending?").unwrap());
        assert!(!console("\n").read_bool("Descending?").unwrap());
    }

    #[test]
    fn test_read_enums() {
        let mut c = console("3\nmileage\n");
        assert_eq!(c.read_color().unwrap(), Color::White);
        assert_eq!(c.read_sort_key().unwrap(), SortKey::Mileage);

        let output = String::from_utf8(c.into_output()).unwrap();
        assert!(output.contains("1. RED"));
        assert!(output.contains("4. COLOR"));

        assert!(console("9\n").read_color().is_err());
    }

    #[test]
    fn test_read_string_with_pattern() {
        let pattern = Regex::new(r"^[A-Z ]+$").unwrap();
        assert_eq!(console("BMW\n").read_string("Model:", &pattern).unwrap(), "BMW");
        assert!(console("bmw\n").read_string("Model:", &pattern).is_err());
    }
}
