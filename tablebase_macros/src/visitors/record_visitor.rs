use syn::{Data, DeriveInput, Fields, Ident, LitStr, Result, Type, Visibility, spanned::Spanned};

use crate::errors::TableRecordDeriveError;

/// Whether a column holds text or numbers, inferred from the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Clone)]
pub struct FieldInfo {
    pub ident: Ident,
    pub ty: Type,
    pub kind: ColumnKind,
    pub label: Option<String>,
    pub required: bool,
}

impl FieldInfo {
    /// Whether the field is a plain `String`, which can lend out its text.
    pub fn is_string(&self) -> bool {
        match &self.ty {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "String"),
            _ => false,
        }
    }
}

/// Everything the generator needs from one `#[derive(TableRecord)]` struct.
pub struct RecordVisitor<'ast> {
    pub name: &'ast Ident,
    pub vis: &'ast Visibility,
    pub key: FieldInfo,
    /// Every field except the key, in declaration order
    pub fields: Vec<FieldInfo>,
}

impl<'ast> RecordVisitor<'ast> {
    pub fn visit(input: &'ast DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(TableRecordDeriveError::GenericsUnsupported.at(input.generics.span()));
        }
        let Data::Struct(data) = &input.data else {
            return Err(TableRecordDeriveError::NotAStruct.at(input.ident.span()));
        };
        let Fields::Named(named) = &data.fields else {
            return Err(TableRecordDeriveError::TupleStruct.at(input.ident.span()));
        };

        let mut key = None;
        let mut fields = Vec::new();
        for field in &named.named {
            let Some(ident) = field.ident.clone() else {
                continue;
            };
            let is_key = field.attrs.iter().any(|a| a.path().is_ident("key"));
            let mut info = FieldInfo {
                ident,
                kind: column_kind(&field.ty),
                ty: field.ty.clone(),
                label: None,
                required: is_key,
            };
            for attr in field.attrs.iter().filter(|a| a.path().is_ident("column")) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("label") {
                        let label: LitStr = meta.value()?.parse()?;
                        info.label = Some(label.value());
                        Ok(())
                    } else if meta.path.is_ident("required") {
                        info.required = true;
                        Ok(())
                    } else {
                        Err(meta.error("expected `label = \"...\"` or `required`"))
                    }
                })?;
            }

            if is_key {
                if key.is_some() {
                    return Err(TableRecordDeriveError::MultipleKeys.at(field.span()));
                }
                key = Some(info);
            } else {
                fields.push(info);
            }
        }

        let key = key.ok_or_else(|| TableRecordDeriveError::KeyNotFound.at(input.ident.span()))?;
        Ok(Self {
            name: &input.ident,
            vis: &input.vis,
            key,
            fields,
        })
    }

    /// Key first, then the remaining fields.
    pub fn columns(&self) -> impl Iterator<Item = &FieldInfo> {
        std::iter::once(&self.key).chain(self.fields.iter())
    }
}

fn column_kind(ty: &Type) -> ColumnKind {
    const NUMERIC: &[&str] = &[
        "f32", "f64", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "usize",
    ];
    match ty {
        Type::Path(path) => match path.path.segments.last() {
            Some(segment) if NUMERIC.iter().any(|n| segment.ident == n) => ColumnKind::Number,
            _ => ColumnKind::Text,
        },
        _ => ColumnKind::Text,
    }
}
