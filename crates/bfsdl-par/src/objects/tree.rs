//! The object tree node: ordered fields plus keyed properties.

use std::collections::BTreeMap;

use bfsdl_util::HashedString;
use thiserror::Error;

use super::{Field, Property};

/// A child being added to a tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    /// A named metadata value.
    Property(Property),
    /// A stream field descriptor.
    Field(Field),
}

impl Object {
    /// The child's name.
    pub fn name(&self) -> &str {
        match self {
            Object::Property(property) => property.name(),
            Object::Field(field) => field.name(),
        }
    }
}

/// A borrowed child yielded by [`Tree::iterate`].
#[derive(Clone, Copy, Debug)]
pub enum ObjectRef<'a> {
    /// A property child.
    Property(&'a Property),
    /// A field child.
    Field(&'a Field),
}

impl<'a> ObjectRef<'a> {
    /// Downcast to a property; None if this child is not one.
    pub fn as_property(self) -> Option<&'a Property> {
        match self {
            ObjectRef::Property(property) => Some(property),
            ObjectRef::Field(_) => None,
        }
    }

    /// Downcast to a field; None if this child is not one.
    pub fn as_field(self) -> Option<&'a Field> {
        match self {
            ObjectRef::Field(field) => Some(field),
            ObjectRef::Property(_) => None,
        }
    }
}

/// Errors from tree mutation.
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    /// A property with this name already exists on the node.
    #[error("property '{0}' is already defined")]
    DuplicateProperty(String),
}

/// A tree node.
///
/// Field iteration follows declaration order. Property iteration order is
/// unspecified but stable for a given tree instance (it follows the hashed
/// string order of the key map).
#[derive(Debug, Default)]
pub struct Tree {
    fields: Vec<Field>,
    properties: BTreeMap<HashedString, Property>,
}

impl Tree {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child.
    ///
    /// Properties are rejected when the name is already present, and the
    /// tree is left unchanged. Fields always append.
    pub fn add(&mut self, object: Object) -> Result<(), TreeError> {
        match object {
            Object::Property(property) => {
                let key = HashedString::new(property.name());
                if self.properties.contains_key(&key) {
                    return Err(TreeError::DuplicateProperty(property.name().to_string()));
                }
                self.properties.insert(key, property);
                Ok(())
            }
            Object::Field(field) => {
                self.fields.push(field);
                Ok(())
            }
        }
    }

    /// Looks up a property by name.
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.get(&HashedString::new(name))
    }

    /// Looks up a property and reads it as UTF-8 text.
    pub fn get_string_property(&self, name: &str) -> Option<&str> {
        self.find_property(name)?.as_string_utf8()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Properties in stable (hash) order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Number of properties on this node.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Visits all children: properties first, then fields in declaration
    /// order. Callbacks downcast through [`ObjectRef`].
    pub fn iterate(&self, mut callback: impl FnMut(ObjectRef<'_>)) {
        for property in self.properties.values() {
            callback(ObjectRef::Property(property));
        }
        for field in &self.fields {
            callback(ObjectRef::Field(field));
        }
    }
}
