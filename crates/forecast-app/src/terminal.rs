//! Line-oriented terminal form surface

use crate::surface::{FormSurface, MessageKind, NumberInput, SurfaceError};
use std::io::{BufRead, Write};
use tracing::debug;

/// Form surface over any line reader and writer (stdin/stdout in the binary)
pub struct TerminalSurface<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a prompt and read one trimmed line; `Closed` at end of input
    fn prompt(&mut self, text: &str) -> Result<String, SurfaceError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SurfaceError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> FormSurface for TerminalSurface<R, W> {
    fn select(&mut self, label: &str, options: &[String]) -> Result<String, SurfaceError> {
        if options.is_empty() {
            return Err(SurfaceError::NoOptions(label.to_string()));
        }

        writeln!(self.output, "{label}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>3}) {}", i + 1, option)?;
        }

        loop {
            let answer = self.prompt(&format!("> [1-{}, por defecto 1]: ", options.len()))?;
            if answer.is_empty() {
                return Ok(options[0].clone());
            }
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(options[n - 1].clone());
                }
            }
            if let Some(option) = options.iter().find(|o| **o == answer) {
                return Ok(option.clone());
            }
            debug!("Rejected selection {:?} for {}", answer, label);
            writeln!(self.output, "Opción no válida: {answer}")?;
        }
    }

    fn number(&mut self, label: &str, input: NumberInput) -> Result<f64, SurfaceError> {
        loop {
            let answer = self.prompt(&format!("{label} [0, paso {}]: ", input.step))?;
            if answer.is_empty() {
                return Ok(0.0);
            }
            match answer.replace(',', ".").parse::<f64>() {
                Ok(value) if input.accepts(value) => return Ok(value),
                _ => {
                    debug!("Rejected number {:?} for {}", answer, label);
                    writeln!(self.output, "Valor no válido: {answer}")?;
                }
            }
        }
    }

    fn message(&mut self, kind: MessageKind, text: &str) -> Result<(), SurfaceError> {
        match kind {
            MessageKind::Error => writeln!(self.output, "[!] {text}")?,
            MessageKind::Result => writeln!(self.output, "==> {text}")?,
        }
        self.output.flush()?;
        Ok(())
    }

    fn button(&mut self, label: &str) -> Result<bool, SurfaceError> {
        let answer = self.prompt(&format!("[Enter] {label} / [q] salir: "))?;
        Ok(!answer.eq_ignore_ascii_case("q"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn surface(input: &str) -> TerminalSurface<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalSurface::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn options() -> Vec<String> {
        vec!["Callao".to_string(), "Lima".to_string()]
    }

    #[test]
    fn test_select_by_index_name_and_default() {
        let mut s = surface("2\nCallao\n\n");
        assert_eq!(s.select("Provincia", &options()).unwrap(), "Lima");
        assert_eq!(s.select("Provincia", &options()).unwrap(), "Callao");
        assert_eq!(s.select("Provincia", &options()).unwrap(), "Callao");
    }

    #[test]
    fn test_select_reprompts_on_invalid() {
        let mut s = surface("7\nCusco\n2\n");
        assert_eq!(s.select("Provincia", &options()).unwrap(), "Lima");
        let output = String::from_utf8(s.into_output()).unwrap();
        assert!(output.contains("Opción no válida: 7"));
        assert!(output.contains("Opción no válida: Cusco"));
    }

    #[test]
    fn test_select_without_options() {
        let mut s = surface("1\n");
        assert!(matches!(s.select("Provincia", &[]), Err(SurfaceError::NoOptions(_))));
    }

    #[test]
    fn test_number_input() {
        let mut s = surface("\n-5\n12.5\n1500\n0,25\n");
        assert_eq!(s.number("Habitantes", NumberInput::integer(100.0)).unwrap(), 0.0);
        assert_eq!(s.number("Habitantes", NumberInput::integer(100.0)).unwrap(), 1500.0);
        assert_eq!(s.number("Metales", NumberInput::decimal(0.0001)).unwrap(), 0.25);
        let output = String::from_utf8(s.into_output()).unwrap();
        assert!(output.contains("Valor no válido: -5"));
        assert!(output.contains("Valor no válido: 12.5"));
    }

    #[test]
    fn test_button_and_close() {
        let mut s = surface("\nq\n");
        assert!(s.button("Predecir").unwrap());
        assert!(!s.button("Predecir").unwrap());
        assert!(matches!(s.button("Predecir"), Err(SurfaceError::Closed)));
    }

    #[test]
    fn test_messages() {
        let mut s = surface("");
        s.message(MessageKind::Error, "COMPLETAR TODOS LOS CAMPOS").unwrap();
        s.message(MessageKind::Result, "PRONÓSTICO DE HOSPITALIZACIONES: 42").unwrap();
        let output = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(
            output,
            "[!] COMPLETAR TODOS LOS CAMPOS\n==> PRONÓSTICO DE HOSPITALIZACIONES: 42\n"
        );
    }
}
