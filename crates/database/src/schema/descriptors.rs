//! Every table the site reads or writes, as first shipped, plus the columns
//! added by later releases.
//!
//! Release history:
//! - v1: initial tables.
//! - v2: `products.category`.
//! - v3: `news` grew from a headline list into full articles.
//! - v4: call-to-action buttons on hero slides.

use super::{ColumnDef, ColumnType, EntityDescriptor, SchemaAddition};
use ColumnType::{Boolean, Date, Integer, Serial, Text, Timestamp, Varchar};

const ID: ColumnDef = ColumnDef::required("id", Serial);
const CREATED_AT: ColumnDef = ColumnDef::required("created_at", Timestamp).default_to("NOW()");
const UPDATED_AT: ColumnDef = ColumnDef::required("updated_at", Timestamp).default_to("NOW()");
const IS_ACTIVE: ColumnDef = ColumnDef::required("is_active", Boolean).default_to("TRUE");
const IS_FEATURED: ColumnDef = ColumnDef::required("is_featured", Boolean).default_to("FALSE");
const POSITION: ColumnDef = ColumnDef::required("position", Integer).default_to("0");

pub static PRODUCTS: EntityDescriptor = EntityDescriptor {
    entity_name: "product",
    table_name: "products",
    columns: &[
        ID,
        ColumnDef::required("name", Varchar(255)),
        ColumnDef::required("slug", Varchar(255)),
        ColumnDef::optional("short_description", Text),
        ColumnDef::optional("description", Text),
        ColumnDef::optional("image_url", Varchar(512)),
        IS_FEATURED,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: Some("slug"),
    additions: &[SchemaAddition {
        version: 2,
        after: "slug",
        column: ColumnDef::optional("category", Varchar(100)),
    }],
};

pub static PRODUCT_SPECIFICATIONS: EntityDescriptor = EntityDescriptor {
    entity_name: "product specification",
    table_name: "product_specifications",
    columns: &[
        ID,
        ColumnDef::required("product_id", Integer).references("products(id) ON DELETE CASCADE"),
        ColumnDef::required("label", Varchar(255)),
        ColumnDef::required("value", Varchar(255)),
        POSITION,
    ],
    unique_key: None,
    additions: &[],
};

pub static PRODUCT_APPLICATIONS: EntityDescriptor = EntityDescriptor {
    entity_name: "product application",
    table_name: "product_applications",
    columns: &[
        ID,
        ColumnDef::required("product_id", Integer).references("products(id) ON DELETE CASCADE"),
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::optional("description", Text),
        POSITION,
    ],
    unique_key: None,
    additions: &[],
};

pub static SOLUTIONS: EntityDescriptor = EntityDescriptor {
    entity_name: "solution",
    table_name: "solutions",
    columns: &[
        ID,
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::required("slug", Varchar(255)),
        ColumnDef::optional("summary", Text),
        ColumnDef::optional("description", Text),
        ColumnDef::optional("icon", Varchar(100)),
        ColumnDef::optional("image_url", Varchar(512)),
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: Some("slug"),
    additions: &[],
};

pub static CASE_STUDIES: EntityDescriptor = EntityDescriptor {
    entity_name: "case study",
    table_name: "case_studies",
    columns: &[
        ID,
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::required("slug", Varchar(255)),
        ColumnDef::optional("client", Varchar(255)),
        ColumnDef::optional("location", Varchar(255)),
        ColumnDef::optional("summary", Text),
        ColumnDef::optional("content", Text),
        ColumnDef::optional("image_url", Varchar(512)),
        IS_FEATURED,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: Some("slug"),
    additions: &[],
};

pub static LAB_EQUIPMENT: EntityDescriptor = EntityDescriptor {
    entity_name: "lab equipment",
    table_name: "lab_equipment",
    columns: &[
        ID,
        ColumnDef::required("name", Varchar(255)),
        ColumnDef::optional("description", Text),
        ColumnDef::optional("image_url", Varchar(512)),
        POSITION,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: None,
    additions: &[],
};

pub static NEWS: EntityDescriptor = EntityDescriptor {
    entity_name: "news article",
    table_name: "news",
    columns: &[
        ID,
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::required("slug", Varchar(255)),
        ColumnDef::optional("description", Text),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: Some("slug"),
    additions: &[
        SchemaAddition {
            version: 3,
            after: "description",
            column: ColumnDef::optional("summary", Text),
        },
        SchemaAddition {
            version: 3,
            after: "summary",
            column: ColumnDef::optional("content", Text),
        },
        SchemaAddition {
            version: 3,
            after: "content",
            column: ColumnDef::optional("image_url", Varchar(512)),
        },
        SchemaAddition {
            version: 3,
            after: "image_url",
            column: ColumnDef::optional("publish_date", Date),
        },
        SchemaAddition {
            version: 3,
            after: "publish_date",
            column: ColumnDef::required("is_published", Boolean).default_to("TRUE"),
        },
    ],
};

pub static HERO_SLIDES: EntityDescriptor = EntityDescriptor {
    entity_name: "hero slide",
    table_name: "hero_slides",
    columns: &[
        ID,
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::optional("subtitle", Text),
        ColumnDef::optional("image_url", Varchar(512)),
        POSITION,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: None,
    additions: &[
        SchemaAddition {
            version: 4,
            after: "is_active",
            column: ColumnDef::optional("button_text", Varchar(100)),
        },
        SchemaAddition {
            version: 4,
            after: "button_text",
            column: ColumnDef::optional("button_link", Varchar(512)),
        },
    ],
};

pub static PAGES: EntityDescriptor = EntityDescriptor {
    entity_name: "page",
    table_name: "pages",
    columns: &[
        ID,
        ColumnDef::required("slug", Varchar(255)),
        ColumnDef::required("title", Varchar(255)),
        ColumnDef::optional("meta_description", Text),
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: Some("slug"),
    additions: &[],
};

pub static CONTENT_BLOCKS: EntityDescriptor = EntityDescriptor {
    entity_name: "content block",
    table_name: "content_blocks",
    columns: &[
        ID,
        ColumnDef::required("page_id", Integer).references("pages(id) ON DELETE CASCADE"),
        ColumnDef::required("block_type", Varchar(50)),
        ColumnDef::optional("title", Varchar(255)),
        ColumnDef::optional("body", Text),
        POSITION,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: None,
    additions: &[],
};

pub static NAVIGATION: EntityDescriptor = EntityDescriptor {
    entity_name: "navigation item",
    table_name: "navigation",
    columns: &[
        ID,
        ColumnDef::required("label", Varchar(100)),
        ColumnDef::required("url", Varchar(512)),
        ColumnDef::optional("parent_id", Integer).references("navigation(id) ON DELETE SET NULL"),
        POSITION,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
    ],
    unique_key: None,
    additions: &[],
};

pub static CONTACT_REQUESTS: EntityDescriptor = EntityDescriptor {
    entity_name: "contact request",
    table_name: "contact_requests",
    columns: &[
        ID,
        ColumnDef::required("name", Varchar(255)),
        ColumnDef::required("email", Varchar(255)),
        ColumnDef::optional("company", Varchar(255)),
        ColumnDef::optional("phone", Varchar(50)),
        ColumnDef::required("message", Text),
        CREATED_AT,
    ],
    unique_key: None,
    additions: &[],
};

pub static NEWSLETTER_SUBSCRIPTIONS: EntityDescriptor = EntityDescriptor {
    entity_name: "newsletter subscription",
    table_name: "newsletter_subscriptions",
    columns: &[ID, ColumnDef::required("email", Varchar(255)), CREATED_AT],
    unique_key: Some("email"),
    additions: &[],
};

/// Every descriptor, ordered so that referenced tables come first.
pub fn all_descriptors() -> [&'static EntityDescriptor; 13] {
    [
        &PRODUCTS,
        &PRODUCT_SPECIFICATIONS,
        &PRODUCT_APPLICATIONS,
        &SOLUTIONS,
        &CASE_STUDIES,
        &LAB_EQUIPMENT,
        &NEWS,
        &HERO_SLIDES,
        &PAGES,
        &CONTENT_BLOCKS,
        &NAVIGATION,
        &CONTACT_REQUESTS,
        &NEWSLETTER_SUBSCRIPTIONS,
    ]
}

/// The ordered list of column additions across all tables.
pub fn schema_history() -> Vec<(&'static str, &'static SchemaAddition)> {
    let mut history: Vec<(&'static str, &'static SchemaAddition)> = all_descriptors()
        .into_iter()
        .flat_map(|descriptor| {
            descriptor
                .additions
                .iter()
                .map(move |addition| (descriptor.table_name, addition))
        })
        .collect();
    history.sort_by_key(|(_, addition)| addition.version);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_descriptor_is_valid() {
        for descriptor in all_descriptors() {
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn table_names_are_unique() {
        let names: HashSet<_> = all_descriptors().iter().map(|d| d.table_name).collect();
        assert_eq!(names.len(), all_descriptors().len());
    }

    #[test]
    fn referenced_tables_are_declared_first() {
        let order: Vec<_> = all_descriptors().iter().map(|d| d.table_name).collect();
        for (index, descriptor) in all_descriptors().iter().enumerate() {
            for column in descriptor.current_columns() {
                if let Some(target) = column.references {
                    let table = target.split('(').next().unwrap_or_default();
                    let position = order.iter().position(|name| *name == table).unwrap();
                    assert!(position <= index, "{} references {table} before it exists", descriptor.table_name);
                }
            }
        }
    }

    #[test]
    fn only_changed_tables_are_marked_evolved() {
        let evolved: Vec<_> = all_descriptors()
            .into_iter()
            .filter(|d| d.has_evolved())
            .map(|d| d.table_name)
            .collect();
        assert_eq!(evolved, ["products", "news", "hero_slides"]);
    }

    #[test]
    fn history_is_in_version_order() {
        let versions: Vec<u32> = schema_history().iter().map(|(_, a)| a.version).collect();
        let mut sorted = versions.clone();
        sorted.sort();
        assert_eq!(versions, sorted);
        assert_eq!(schema_history().first().map(|(table, _)| *table), Some("products"));
    }

    #[test]
    fn news_gained_the_article_columns() {
        let added: Vec<_> = NEWS.additions.iter().map(|a| a.column.name).collect();
        assert_eq!(added, ["summary", "content", "image_url", "publish_date", "is_published"]);
    }
}
