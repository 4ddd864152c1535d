use super::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct NewNgo {
    pub org_name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(Error::Email),
    }
}

/// Registers a new NGO or replaces an existing one.
///
/// NGOs with an email address are identified by it (case insensitive),
/// registering the same address again updates the existing record.
pub fn store_ngo<R: NgoRepo>(repo: &R, new_ngo: NewNgo) -> Result<Id> {
    let NewNgo {
        org_name,
        contact_person,
        email,
        phone,
        address,
    } = new_ngo;
    let org_name = org_name.trim().to_owned();
    if org_name.is_empty() {
        return Err(Error::OrgName);
    }
    let email = non_empty(email).as_deref().map(normalize_email).transpose()?;
    let id = email.as_deref().map(Id::from).unwrap_or_else(Id::new);
    let ngo = Ngo {
        id: id.clone(),
        org_name,
        contact_person: non_empty(contact_person),
        email,
        phone: non_empty(phone),
        address: address.trim().into(),
    };
    if !ngo.has_address() {
        log::warn!("NGO {id} has been stored without an address");
    }
    repo.create_or_update_ngo(&ngo)?;
    Ok(id)
}
