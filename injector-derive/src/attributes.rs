use syn::{Attribute, Error, Path};

pub struct InjectableAttributes {
    pub interfaces: Vec<Path>,
}

impl TryFrom<&Attribute> for InjectableAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut interfaces = vec![];
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("interfaces") {
                meta.parse_nested_meta(|interface| {
                    interfaces.push(interface.path);
                    Ok(())
                })
            } else {
                Err(meta.error("unsupported injectable attribute"))
            }
        })?;

        Ok(Self { interfaces })
    }
}
