//! Table definitions.

use crate::error::{CoreError, CoreResult};
use tablestore_client::{
    is_valid_table_name, AttributeDefinition, CreateTableRequest, KeySchemaElement, KeyType,
    ProvisionedThroughput, ScalarAttributeType,
};

/// Schema and capacity of a table to create.
///
/// The hash key is mandatory. The range key element and its attribute
/// definition are both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name.
    pub table_name: String,
    /// Provisioned read capacity units.
    pub read_capacity_units: u64,
    /// Provisioned write capacity units.
    pub write_capacity_units: u64,
    /// Partition key element.
    pub hash_key: KeySchemaElement,
    /// Type of the partition key attribute.
    pub hash_attribute: AttributeDefinition,
    /// Sort key element.
    pub range_key: Option<KeySchemaElement>,
    /// Type of the sort key attribute.
    pub range_attribute: Option<AttributeDefinition>,
}

impl TableDefinition {
    /// Default provisioned capacity for both reads and writes.
    pub const DEFAULT_CAPACITY_UNITS: u64 = 5;

    /// Creates a definition with a partition key only.
    pub fn new(
        table_name: impl Into<String>,
        hash_key: impl Into<String>,
        hash_type: ScalarAttributeType,
    ) -> Self {
        let hash_key = hash_key.into();
        Self {
            table_name: table_name.into(),
            read_capacity_units: Self::DEFAULT_CAPACITY_UNITS,
            write_capacity_units: Self::DEFAULT_CAPACITY_UNITS,
            hash_attribute: AttributeDefinition::new(hash_key.clone(), hash_type),
            hash_key: KeySchemaElement::hash(hash_key),
            range_key: None,
            range_attribute: None,
        }
    }

    /// Adds a sort key.
    #[must_use]
    pub fn with_range_key(mut self, name: impl Into<String>, range_type: ScalarAttributeType) -> Self {
        let name = name.into();
        self.range_attribute = Some(AttributeDefinition::new(name.clone(), range_type));
        self.range_key = Some(KeySchemaElement::range(name));
        self
    }

    /// Sets the provisioned capacity.
    #[must_use]
    pub fn with_capacity(mut self, read_capacity_units: u64, write_capacity_units: u64) -> Self {
        self.read_capacity_units = read_capacity_units;
        self.write_capacity_units = write_capacity_units;
        self
    }

    /// Checks the definition is self-consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDefinition`] describing the first
    /// problem found.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_table_name(&self.table_name) {
            return Err(CoreError::invalid_definition(format!(
                "table name {:?} must be 3 to 255 characters of [A-Za-z0-9_.-]",
                self.table_name
            )));
        }
        if self.read_capacity_units == 0 || self.write_capacity_units == 0 {
            return Err(CoreError::invalid_definition(
                "read and write capacity must be positive",
            ));
        }

        check_element(&self.hash_key, &self.hash_attribute, KeyType::Hash)?;

        match (&self.range_key, &self.range_attribute) {
            (None, None) => Ok(()),
            (Some(element), Some(attribute)) => {
                check_element(element, attribute, KeyType::Range)?;
                if element.attribute_name == self.hash_key.attribute_name {
                    return Err(CoreError::invalid_definition(
                        "hash and range keys must be different attributes",
                    ));
                }
                Ok(())
            }
            _ => Err(CoreError::invalid_definition(
                "range key element and range attribute definition must be given together",
            )),
        }
    }

    /// Builds the backend request, validating first.
    pub fn to_create_request(&self) -> CoreResult<CreateTableRequest> {
        self.validate()?;

        let mut key_schema = vec![self.hash_key.clone()];
        let mut attribute_definitions = vec![self.hash_attribute.clone()];
        if let (Some(element), Some(attribute)) = (&self.range_key, &self.range_attribute) {
            key_schema.push(element.clone());
            attribute_definitions.push(attribute.clone());
        }

        Ok(CreateTableRequest {
            table_name: self.table_name.clone(),
            key_schema,
            attribute_definitions,
            provisioned_throughput: ProvisionedThroughput {
                read_capacity_units: self.read_capacity_units,
                write_capacity_units: self.write_capacity_units,
            },
        })
    }
}

fn check_element(
    element: &KeySchemaElement,
    attribute: &AttributeDefinition,
    expected: KeyType,
) -> CoreResult<()> {
    if element.key_type != expected {
        return Err(CoreError::invalid_definition(format!(
            "key element {} must have key type {expected}",
            element.attribute_name
        )));
    }
    if element.attribute_name != attribute.attribute_name {
        return Err(CoreError::invalid_definition(format!(
            "key element {} and attribute definition {} name different attributes",
            element.attribute_name, attribute.attribute_name
        )));
    }
    Ok(())
}
