use std::{
    collections::{btree_map, BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anchor_client::Cluster;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::{Error, Result};

pub const MANIFEST_NAME: &str = "Anchor.toml";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    programs: HashMap<String, HashMap<String, ProgramDecl>>,
    provider: Option<ProviderSection>,
}

/// `name = "<id>"` or `name = { address = "<id>", idl = "<path>" }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProgramDecl {
    Address(String),
    Table {
        address: String,
        #[serde(default)]
        idl: Option<String>,
    },
}

impl ProgramDecl {
    fn address(&self) -> &str {
        match self {
            Self::Address(address) | Self::Table { address, .. } => address,
        }
    }

    fn idl(&self) -> Option<&str> {
        match self {
            Self::Address(_) => None,
            Self::Table { idl, .. } => idl.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderSection {
    cluster: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    id: Pubkey,
    idl: Option<String>,
}

/// Programs declared in `Anchor.toml` for one cluster.
///
/// Lookups ignore case, `_` and `-`, so the generated camel-case type name
/// (`HelloWorld`), the crate name (`hello-world`) and the lib name
/// (`hello_world`) all resolve to the same program.
#[derive(Debug, Clone)]
pub struct Workspace {
    programs: BTreeMap<String, Entry>,
    provider_cluster: Option<String>,
    root: Option<PathBuf>,
}

impl Workspace {
    pub fn from_toml_str(src: &str, cluster: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(src)?;

        let mut programs = BTreeMap::new();
        for (name, decl) in manifest.programs.get(cluster).into_iter().flatten() {
            let id = Pubkey::from_str(decl.address()).map_err(|_| Error::InvalidProgramId {
                name: name.clone(),
                id: decl.address().to_string(),
            })?;
            let entry = Entry {
                name: name.clone(),
                id,
                idl: decl.idl().map(str::to_string),
            };

            match programs.entry(normalize(name)) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                btree_map::Entry::Occupied(taken) => {
                    let (first, second) = if taken.get().name <= entry.name {
                        (taken.get().name.clone(), entry.name)
                    } else {
                        (entry.name, taken.get().name.clone())
                    };
                    return Err(Error::AmbiguousProgram { first, second });
                }
            }
        }

        Ok(Self {
            programs,
            provider_cluster: manifest.provider.map(|provider| provider.cluster),
            root: None,
        })
    }

    pub fn from_path(path: &Path, cluster: &str) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        let mut workspace = Self::from_toml_str(&src, cluster)?;
        workspace.root = path.parent().map(Path::to_path_buf);
        Ok(workspace)
    }

    /// Walks up from `start` until a directory containing `Anchor.toml` is found.
    pub fn discover(start: &Path, cluster: &str) -> Result<Self> {
        let manifest = start
            .ancestors()
            .map(|dir| dir.join(MANIFEST_NAME))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| Error::ManifestNotFound(start.to_path_buf()))?;
        debug!(manifest = %manifest.display(), %cluster, "loading workspace");

        Self::from_path(&manifest, cluster)
    }

    pub fn program_id(&self, name: &str) -> Result<Pubkey> {
        self.programs
            .get(&normalize(name))
            .map(|entry| entry.id)
            .ok_or_else(|| Error::ProgramNotFound(name.to_string()))
    }

    /// IDL path from the table form of the declaration, if one was given.
    pub fn idl_path(&self, name: &str) -> Result<Option<&str>> {
        self.programs
            .get(&normalize(name))
            .map(|entry| entry.idl.as_deref())
            .ok_or_else(|| Error::ProgramNotFound(name.to_string()))
    }

    /// Declared program names with their ids, sorted by normalized name.
    pub fn programs(&self) -> impl Iterator<Item = (&str, Pubkey)> {
        self.programs
            .values()
            .map(|entry| (entry.name.as_str(), entry.id))
    }

    /// Directory holding the manifest, when loaded from disk.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// RPC url of `[provider] cluster`, if the manifest names one.
    pub fn cluster_url(&self) -> Result<Option<String>> {
        let Some(cluster) = &self.provider_cluster else {
            return Ok(None);
        };
        let cluster = cluster
            .parse::<Cluster>()
            .map_err(|err| Error::InvalidCluster {
                url: cluster.clone(),
                message: err.to_string(),
            })?;
        Ok(Some(cluster.url().to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
