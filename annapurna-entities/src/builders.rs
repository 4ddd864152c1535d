pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::ngo_builder::*;

pub mod ngo_builder {

    use super::*;
    use crate::{address::*, id::*, ngo::*};

    #[derive(Debug)]
    pub struct NgoBuild {
        ngo: Ngo,
    }

    impl NgoBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.ngo.id = id.into();
            self
        }
        pub fn org_name(mut self, name: &str) -> Self {
            self.ngo.org_name = name.into();
            self
        }
        pub fn contact_person(mut self, x: &str) -> Self {
            self.ngo.contact_person = Some(x.into());
            self
        }
        pub fn email(mut self, x: &str) -> Self {
            self.ngo.email = Some(x.into());
            self
        }
        pub fn phone(mut self, x: &str) -> Self {
            self.ngo.phone = Some(x.into());
            self
        }
        pub fn address(mut self, addr: &str) -> Self {
            self.ngo.address = Address::from(addr);
            self
        }
        pub fn finish(self) -> Ngo {
            self.ngo
        }
    }

    impl Builder for Ngo {
        type Build = NgoBuild;
        fn build() -> NgoBuild {
            NgoBuild {
                ngo: Ngo {
                    id: Id::new(),
                    org_name: "".into(),
                    contact_person: None,
                    email: None,
                    phone: None,
                    address: Address::default(),
                },
            }
        }
    }
}
