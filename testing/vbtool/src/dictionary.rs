use std::{path::Path, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use fnv::FnvHashMap;
use tracing::{error, info, instrument};
use valuebox::{EnumTable, FrType, ValueBox};
use yaml::{StrictYaml, StrictYamlLoader};

#[derive(Debug, Clone, Default)]
/// Enumeration aliases, keyed by attribute name
pub(crate) struct Dictionary {
    tables: FnvHashMap<String, Arc<EnumTable>>,
}

impl Dictionary {
    #[instrument]
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read dictionary {}", path.display()))?;
        let dict = Self::parse(&text)?;
        info!(tables = dict.tables.len(), "Loaded dictionary");
        Ok(dict)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut docs = StrictYamlLoader::load_from_str(text)?;
        let Some(doc) = docs.pop() else {
            return Ok(Self::default());
        };
        if !docs.is_empty() {
            bail!("Dictionary must be a single YAML document");
        }
        let root = doc.as_hash().ok_or_else(|| anyhow!("Dictionary root must be a mapping"))?;
        let mut ret = Self::default();
        for (section, val) in root {
            match section.as_str() {
                Some("enums") => ret.parse_enums_section(val)?,
                other => error!("unknown section \"{}\" in dictionary", other.unwrap_or("<non-string>")),
            }
        }
        Ok(ret)
    }

    fn parse_enums_section(&mut self, section: &StrictYaml) -> Result<()> {
        let section = section.as_hash().ok_or_else(|| anyhow!("\"enums\" must be a mapping"))?;
        for (attr, settings) in section {
            let attr = attr.as_str().ok_or_else(|| anyhow!("Attribute names must be strings"))?;
            let settings = settings.as_hash().ok_or_else(|| anyhow!("Enum \"{attr}\" must be a mapping"))?;
            let mut ty = None;
            let mut values = None;
            for (setting, val) in settings {
                match setting.as_str() {
                    Some("type") => {
                        let name = val.as_str().ok_or_else(|| anyhow!("Enum \"{attr}\" type must be a string"))?;
                        ty = Some(FrType::try_from(name)?);
                    }
                    Some("values") => values = Some(val),
                    other => error!("Unknown enum setting \"{}\" for {attr}", other.unwrap_or("<non-string>")),
                }
            }
            let ty = ty.ok_or_else(|| anyhow!("Enum \"{attr}\" has no type"))?;
            let mut table = EnumTable::new(attr, ty);
            if let Some(values) = values.and_then(StrictYaml::as_hash) {
                for (alias, val) in values {
                    let (Some(alias), Some(text)) = (alias.as_str(), val.as_str()) else {
                        bail!("Enum \"{attr}\" values must be string pairs");
                    };
                    let mut vty = ty;
                    let value = ValueBox::from_str(&mut vty, None, text.as_bytes(), None, false)
                        .with_context(|| format!("Bad value for {attr} alias {alias}"))?;
                    table.add(alias, value)?;
                }
            }
            self.tables.insert(attr.to_owned(), Arc::new(table));
        }
        Ok(())
    }

    pub(crate) fn get(&self, attr: &str) -> Option<&Arc<EnumTable>> {
        self.tables.get(attr)
    }
}
