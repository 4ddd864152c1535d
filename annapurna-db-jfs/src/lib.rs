//! NGO repository backed by a single JSON file.
//!
//! The file contains one object that maps the id of each NGO
//! to its record, i.e. the whole collection is read on every
//! access. The iteration order of all NGOs is the lexicographical
//! order of their ids.

use annapurna_core::{
    entities::*,
    repositories::{Error as RepoError, NgoRepo},
};
use jfs::{Config, Store};
use serde::{Deserialize, Deserializer, Serialize};
use std::{io, path::Path};

type Result<T> = std::result::Result<T, RepoError>;

pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    /// Opens the collection, an empty one is created if the file does not exist.
    pub fn try_new<P: AsRef<Path>>(file_path: P) -> io::Result<Self> {
        let cfg = Config {
            single: true,
            pretty: true,
            ..Default::default()
        };
        let json_store = Store::new_with_cfg(file_path, cfg)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

fn null_as_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize)]
struct NgoRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    org_name: String,
    #[serde(default)]
    contact_person: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    address: String,
}

impl NgoRecord {
    fn into_ngo(self, id: &str) -> Ngo {
        let Self {
            org_name,
            contact_person,
            email,
            phone,
            address,
        } = self;
        Ngo {
            id: id.into(),
            org_name,
            contact_person,
            email,
            phone,
            address: address.into(),
        }
    }
}

impl From<&Ngo> for NgoRecord {
    fn from(from: &Ngo) -> Self {
        Self {
            org_name: from.org_name.clone(),
            contact_person: from.contact_person.clone(),
            email: from.email.clone(),
            phone: from.phone.clone(),
            address: from.address.as_str().to_owned(),
        }
    }
}

impl NgoRepo for JsonFileStore {
    fn all_ngos(&self) -> Result<Vec<Ngo>> {
        let records = self.json_store.all::<NgoRecord>()?;
        log::debug!(
            "Loaded {} NGOs from {}",
            records.len(),
            self.path().display()
        );
        Ok(records
            .into_iter()
            .map(|(id, record)| record.into_ngo(&id))
            .collect())
    }

    fn get_ngo(&self, id: &str) -> Result<Ngo> {
        self.all_ngos()?
            .into_iter()
            .find(|ngo| ngo.id.as_str() == id)
            .ok_or(RepoError::NotFound)
    }

    fn create_or_update_ngo(&self, ngo: &Ngo) -> Result<()> {
        debug_assert!(ngo.id.is_valid());
        self.json_store
            .save_with_id(&NgoRecord::from(ngo), ngo.id.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annapurna_entities::builders::*;
    use std::{env, fs, path::PathBuf};

    struct TempFile(PathBuf);

    impl TempFile {
        fn new() -> Self {
            Self(env::temp_dir().join(format!("annapurna-ngos-{}.json", uuid::Uuid::new_v4())))
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn store_and_load_ngos() {
        let file = TempFile::new();
        let store = JsonFileStore::try_new(&file.0).unwrap();
        assert!(store.all_ngos().unwrap().is_empty());

        let b = Ngo::build()
            .id("b@example.org")
            .org_name("B")
            .email("b@example.org")
            .address("Ranjhi, Jabalpur")
            .finish();
        let a = Ngo::build()
            .id("a@example.org")
            .org_name("A")
            .phone("+91 761 000000")
            .contact_person("Asha")
            .finish();
        store.create_or_update_ngo(&b).unwrap();
        store.create_or_update_ngo(&a).unwrap();

        assert_eq!(vec![a.clone(), b.clone()], store.all_ngos().unwrap());
        assert_eq!(b, store.get_ngo("b@example.org").unwrap());
        assert_eq!(2, store.count_ngos().unwrap());

        let reopened = JsonFileStore::try_new(&file.0).unwrap();
        assert_eq!(vec![a, b], reopened.all_ngos().unwrap());
    }

    #[test]
    fn update_existing_ngo() {
        let file = TempFile::new();
        let store = JsonFileStore::try_new(&file.0).unwrap();
        let mut ngo = Ngo::build().id("x").org_name("Old").finish();
        store.create_or_update_ngo(&ngo).unwrap();
        ngo.org_name = "New".into();
        store.create_or_update_ngo(&ngo).unwrap();
        let all = store.all_ngos().unwrap();
        assert_eq!(1, all.len());
        assert_eq!("New", all[0].org_name);
    }

    #[test]
    fn missing_ngo() {
        let file = TempFile::new();
        let store = JsonFileStore::try_new(&file.0).unwrap();
        assert!(matches!(store.get_ngo("nope"), Err(RepoError::NotFound)));
    }

    #[test]
    fn keep_records_without_name_or_with_null_fields() {
        let file = TempFile::new();
        fs::write(
            &file.0,
            r#"{
                "a@example.org": { "org_name": "A", "address": "Ranjhi" },
                "b@example.org": { "address": "Adhartal" },
                "c@example.org": { "org_name": null, "address": null, "phone": null }
            }"#,
        )
        .unwrap();
        let store = JsonFileStore::try_new(&file.0).unwrap();
        let ngos = store.all_ngos().unwrap();
        assert_eq!(3, ngos.len());

        let b = &ngos[1];
        assert_eq!("b@example.org", b.id.as_str());
        assert_eq!("", b.org_name);
        assert_eq!("NGO", b.display_name());
        assert_eq!("Adhartal", b.address.as_str());

        let c = &ngos[2];
        assert!(!c.has_address());
        assert!(c.phone.is_none());
    }

    #[test]
    fn read_records_with_missing_and_unknown_fields() {
        #[derive(Serialize, Deserialize)]
        struct RegisteredNgo {
            org_name: String,
            hashed_password: String,
        }

        let file = TempFile::new();
        let store = JsonFileStore::try_new(&file.0).unwrap();
        let registered = RegisteredNgo {
            org_name: "Roti Bank".into(),
            hashed_password: "xxx".into(),
        };
        store
            .json_store
            .save_with_id(&registered, "roti@example.org")
            .unwrap();

        let ngos = store.all_ngos().unwrap();
        assert_eq!(1, ngos.len());
        assert_eq!("roti@example.org", ngos[0].id.as_str());
        assert_eq!("Roti Bank", ngos[0].org_name);
        assert!(!ngos[0].has_address());
    }
}
