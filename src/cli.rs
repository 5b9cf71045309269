//! Interface de linha de comando baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (values, check, flags,
//! walk, demo) e flags globais (--catalog, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Enumerações, flags e máquinas de estado declaradas em um catálogo TOML.
#[derive(Debug, Parser)]
#[command(name = "enumerables", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do catálogo (padrão: `enumerables.toml` ou `$ENUMERABLES_CATALOG`).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Habilita logs detalhados (debug).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista os tipos do catálogo ou os valores de um tipo.
    Values {
        /// Nome do tipo; omitido lista todos os tipos.
        kind: Option<String>,
    },

    /// Valida um valor de enumeração.
    Check { kind: String, value: String },

    /// Valida uma máscara de flags e aplica adições/remoções.
    Flags {
        kind: String,
        bits: u64,

        /// Flags a adicionar (pode repetir).
        #[arg(long)]
        add: Vec<u64>,

        /// Flags a remover (pode repetir).
        #[arg(long)]
        remove: Vec<u64>,
    },

    /// Inicia uma máquina de estado e aplica as transições em ordem.
    Walk {
        kind: String,
        initial: String,
        states: Vec<String>,

        /// Nota registrada em cada transição.
        #[arg(long)]
        note: Option<String>,
    },

    /// Executa a demonstração embutida da máquina de estados.
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_walk_subcommand() {
        let cli = Cli::parse_from([
            "enumerables", "walk", "Step", "Paso1", "Paso2", "Paso4", "--note", "ok",
        ]);
        match cli.command {
            Command::Walk {
                kind,
                initial,
                states,
                note,
            } => {
                assert_eq!(kind, "Step");
                assert_eq!(initial, "Paso1");
                assert_eq!(states, ["Paso2", "Paso4"]);
                assert_eq!(note.as_deref(), Some("ok"));
            }
            _ => panic!("expected Walk command"),
        }
    }

    #[test]
    fn cli_parses_repeated_flag_arguments() {
        let cli = Cli::parse_from([
            "enumerables", "flags", "Permission", "1", "--add", "2", "--add", "4", "--remove",
            "1",
        ]);
        match cli.command {
            Command::Flags {
                kind,
                bits,
                add,
                remove,
            } => {
                assert_eq!(kind, "Permission");
                assert_eq!(bits, 1);
                assert_eq!(add, [2, 4]);
                assert_eq!(remove, [1]);
            }
            _ => panic!("expected Flags command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["enumerables", "--catalog", "kinds.toml", "-v", "values"]);
        assert!(cli.verbose);
        assert_eq!(cli.catalog, Some(PathBuf::from("kinds.toml")));
        assert!(matches!(cli.command, Command::Values { kind: None }));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
