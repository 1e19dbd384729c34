use crate::types::*;

pub fn generate_type_name(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Text => "text".to_string(),
        FieldType::Integer => "integer".to_string(),
        FieldType::Number => "number".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Email => "email".to_string(),
        FieldType::Optional { inner } => format!("optional<{}>", generate_type_name(inner)),
        FieldType::List { element, min, max } => {
            format!("list<{}>[{}..={}]", generate_type_name(element), min, max)
        }
        FieldType::Record { shape } => shape.to_string(),
    }
}

/// Renders a shape as a readable declaration, one field per line.
pub fn generate_declaration(schema: &ShapeSchema) -> String {
    let mut code = String::new();

    code.push_str(&format!("{} {{\n", schema.name));
    for field in &schema.fields {
        code.push_str(&format!(
            "    {}: {}",
            field.name,
            generate_type_name(&field.field_type)
        ));
        if let (false, Some(default)) = (field.required, &field.default) {
            code.push_str(&format!(" = {}", default));
        }
        code.push_str(",\n");
    }
    code.push_str("}\n");

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductResponse};
    use crate::record::Shape;

    #[test]
    fn test_generate_product_declaration() {
        let code = generate_declaration(&Product::schema());
        assert_eq!(
            code,
            "Product {\n    name: text,\n    price: number,\n    currency: text,\n    tag_line: optional<text> = null,\n}\n"
        );
    }

    #[test]
    fn test_generate_list_type_name() {
        let code = generate_declaration(&ProductResponse::schema());
        assert!(code.contains("products: list<Product>[0..=100],"));
    }
}
