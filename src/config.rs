//! Configuração do catálogo carregada a partir de `enumerables.toml`.
//!
//! A struct [`CatalogConfig`] lista os tipos declarados: enumerações simples
//! (`[[enums]]`), flags (`[[flags]]`) e máquinas de estado (`[[states]]`).
//! Os valores são arrays para preservar a ordem de definição.
//! A variável de ambiente `ENUMERABLES_CATALOG` tem precedência sobre o
//! arquivo padrão.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CatalogError;

/// Arquivo lido quando nenhum caminho é informado.
pub const DEFAULT_CATALOG_PATH: &str = "enumerables.toml";

/// Variável de ambiente que aponta para outro arquivo de catálogo.
pub const CATALOG_PATH_ENV: &str = "ENUMERABLES_CATALOG";

/// Configuração de nível superior carregada de `enumerables.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Enumerações de valores texto.
    #[serde(default)]
    pub enums: Vec<EnumConfig>,

    /// Conjuntos de flags em potências de dois.
    #[serde(default)]
    pub flags: Vec<FlagConfig>,

    /// Máquinas de estado com grafo de transições.
    #[serde(default)]
    pub states: Vec<StateConfig>,
}

/// Par `{ name, value }` na ordem em que foi declarado.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig<V> {
    pub name: String,
    pub value: V,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumConfig {
    pub kind: String,
    pub values: Vec<EntryConfig<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagConfig {
    pub kind: String,
    pub values: Vec<EntryConfig<u64>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    pub kind: String,
    pub values: Vec<EntryConfig<String>>,

    /// Estados a partir dos quais a máquina pode começar.
    pub initial: Vec<String>,

    /// Arestas por estado. Estado ausente: sem restrição. Lista vazia: terminal.
    #[serde(default)]
    pub transitions: BTreeMap<String, Vec<String>>,
}

impl CatalogConfig {
    /// Carrega o catálogo do caminho resolvido por [`resolve_path`].
    /// Usa um catálogo vazio se o arquivo padrão não existir.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CatalogError> {
        let env = std::env::var(CATALOG_PATH_ENV).ok();
        match resolve_path(explicit, env) {
            Some(path) => Self::from_file(&path),
            None => {
                let path = Path::new(DEFAULT_CATALOG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }
}

// Caminho explícito (CLI) vence a variável de ambiente; valor vazio é ignorado.
fn resolve_path(explicit: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    env.filter(|value| !value.is_empty()).map(PathBuf::from)
}
