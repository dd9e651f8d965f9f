//! Category tree, category attributes and brands.
//!
//! Category attributes come back nested (`attribute`, `attributeValues`);
//! [`Categories::category_attributes`] flattens them into
//! [`CategoryAttribute`] so the ids can go straight into
//! [`ProductAttribute`](super::ProductAttribute).

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints::{self, PathArg};
use crate::rest::{Page, ResourceError};

/// A product category with its children.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub sub_categories: Vec<Category>,
}

/// A category attribute and its predefined values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryAttribute {
    pub attribute_id: i64,
    pub attribute_name: String,
    pub required: bool,
    pub allow_custom_value: bool,
    pub varianter: bool,
    pub slicer: bool,
    pub attribute_values: Vec<AttributeValue>,
}

/// A predefined attribute value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeValue {
    pub attribute_value_id: i64,
    pub value: String,
}

/// A brand.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct BrandsResponse {
    #[serde(default)]
    brands: Vec<Brand>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributesResponse {
    #[serde(default)]
    category_attributes: Vec<RawCategoryAttribute>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawCategoryAttribute {
    attribute: IdName,
    attribute_values: Vec<IdName>,
    required: bool,
    allow_custom: bool,
    varianter: bool,
    slicer: bool,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IdName {
    id: i64,
    name: String,
}

impl From<RawCategoryAttribute> for CategoryAttribute {
    fn from(raw: RawCategoryAttribute) -> Self {
        Self {
            attribute_id: raw.attribute.id,
            attribute_name: raw.attribute.name,
            required: raw.required,
            allow_custom_value: raw.allow_custom,
            varianter: raw.varianter,
            slicer: raw.slicer,
            attribute_values: raw
                .attribute_values
                .into_iter()
                .map(|v| AttributeValue {
                    attribute_value_id: v.id,
                    value: v.name,
                })
                .collect(),
        }
    }
}

service! {
    /// Category and brand lookups.
    Categories
}

impl Categories<'_> {
    /// Returns the full category tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ResourceError> {
        let path = self.scope.path(endpoints::GET_CATEGORIES, &[])?;
        let response: CategoriesResponse = self
            .scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await?;
        Ok(response.categories)
    }

    /// Returns the attributes of a leaf category.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn category_attributes(
        &self,
        category_id: i64,
    ) -> Result<Vec<CategoryAttribute>, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_CATEGORY_ATTRIBUTES, &[PathArg::from(category_id)])?;
        let response: AttributesResponse = self
            .scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await?;
        Ok(response
            .category_attributes
            .into_iter()
            .map(CategoryAttribute::from)
            .collect())
    }

    /// Lists brands. The endpoint reports no totals, so the returned page
    /// has none either.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list_brands(&self, page: u32, size: u32) -> Result<Page<Brand>, ResourceError> {
        let path = self.scope.path(endpoints::GET_BRANDS, &[])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("page", page)
            .query_param("size", size)
            .build();
        let response: BrandsResponse = self.scope.json(request).await?;
        Ok(Page::unpaged(response.brands, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_attributes_are_flattened() {
        let response: AttributesResponse = serde_json::from_str(
            r#"{
                "id": 411,
                "name": "T-Shirt",
                "categoryAttributes": [
                    {
                        "attribute": {"id": 338, "name": "Beden"},
                        "attributeValues": [{"id": 4602, "name": "M"}, {"id": 4603, "name": "L"}],
                        "required": true,
                        "allowCustom": false,
                        "varianter": true
                    },
                    {
                        "attribute": {"id": 47, "name": "Renk"},
                        "attributeValues": [],
                        "allowCustom": true
                    }
                ]
            }"#,
        )
        .unwrap();

        let attributes: Vec<CategoryAttribute> = response
            .category_attributes
            .into_iter()
            .map(CategoryAttribute::from)
            .collect();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].attribute_id, 338);
        assert_eq!(attributes[0].attribute_name, "Beden");
        assert!(attributes[0].required);
        assert!(attributes[0].varianter);
        assert_eq!(
            attributes[0].attribute_values[1],
            AttributeValue {
                attribute_value_id: 4603,
                value: "L".to_string()
            }
        );
        assert!(attributes[1].allow_custom_value);
        assert!(attributes[1].attribute_values.is_empty());
    }

    #[test]
    fn test_category_tree_deserializes() {
        let response: CategoriesResponse = serde_json::from_str(
            r#"{"categories":[
                {"id":1,"name":"Giyim","subCategories":[{"id":2,"name":"Kadın","parentId":1}]}
            ]}"#,
        )
        .unwrap();

        let root = &response.categories[0];
        assert_eq!(root.parent_id, None);
        assert_eq!(root.sub_categories[0].parent_id, Some(1));
    }
}
