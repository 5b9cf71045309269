//! Saída de terminal com cores.
//!
//! Usa a crate `console` para estilização. O [`Printer`] mostra valores,
//! resultados de validação e o log de auditoria de uma máquina de estado.

use console::Style;

use enumerables::{KindRef, LogEntry, StateMachine};

/// Estilos verde (sucesso), vermelho (falha) e amarelo (notas).
pub struct Printer {
    green: Style,
    red: Style,
    yellow: Style,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    pub fn ok(&self, message: &str) {
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    pub fn fail(&self, message: &str) {
        println!("  {} {message}", self.red.apply_to("✗"));
    }

    pub fn note(&self, message: &str) {
        println!("  {}", self.yellow.apply_to(message));
    }

    /// Lista os pares nome/valor de um tipo na ordem de definição.
    pub fn print_kind(&self, kind: &str, kind_ref: &KindRef<'_>) {
        println!("{kind} ({})", kind_ref.class());
        for (name, value) in kind_ref.entries() {
            println!("  {name} = {value}");
        }
    }

    /// Imprime o log da máquina, uma linha por entrada, seguido do JSON.
    pub fn print_log(&self, machine: &StateMachine) {
        println!();
        println!("{}", self.green.apply_to("─── Audit Log ───"));
        for entry in machine.log() {
            println!("  {}", render_entry(entry));
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&machine.to_record()).unwrap_or_default()
        );
    }
}

// Formato: `<rfc3339> <from|·> -> <to> [note]`.
fn render_entry(entry: &LogEntry) -> String {
    let from = entry.from.as_deref().unwrap_or("·");
    let mut line = format!("{} {from} -> {}", entry.at.to_rfc3339(), entry.to);
    if let Some(note) = &entry.note {
        line.push_str(&format!(" [{note}]"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn render_genesis_and_noted_entries() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let genesis = LogEntry {
            at,
            from: None,
            to: "Paso1".into(),
            note: None,
        };
        assert_eq!(render_entry(&genesis), "2024-05-01T12:00:00+00:00 · -> Paso1");

        let step = LogEntry {
            from: Some("Paso1".into()),
            to: "Paso2".into(),
            note: Some("approved".into()),
            ..genesis
        };
        assert_eq!(
            render_entry(&step),
            "2024-05-01T12:00:00+00:00 Paso1 -> Paso2 [approved]"
        );
    }
}
