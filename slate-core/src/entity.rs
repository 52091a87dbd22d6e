use crate::{Result, Value};

/// Record type mapped to table rows through its properties.
///
/// Implemented with the [`entity!`](crate::entity) macro, which exposes the listed fields
/// as properties named after the field or after an explicit name.
pub trait Entity: Default + Send + 'static {
    /// Property names, in declaration order.
    fn properties() -> &'static [&'static str];
    /// Current value of a property, `None` when there is no such property.
    fn property(&self, name: &str) -> Option<Value>;
    /// Coerce `value` into the property type and assign it.
    fn set_property(&mut self, name: &str, value: Value) -> Result<()>;
}

/// Implements [`Entity`] for a struct whose fields implement [`AsValue`](crate::AsValue) and
/// `Clone`.
///
/// ```ignore
/// #[derive(Default, Debug, Clone, PartialEq)]
/// struct EntityTest {
///     id: String,
///     name: Option<String>,
///     create_time: Option<String>,
/// }
/// slate::entity!(EntityTest { id, name, create_time => "createTime" });
/// ```
#[macro_export]
macro_rules! entity {
    (@property $field:ident => $property:literal) => {
        $property
    };
    (@property $field:ident) => {
        stringify!($field)
    };
    ($entity:ty { $($field:ident $(=> $property:literal)?),* $(,)? }) => {
        impl $crate::Entity for $entity {
            fn properties() -> &'static [&'static str] {
                &[$($crate::entity!(@property $field $(=> $property)?)),*]
            }
            fn property(&self, name: &str) -> ::std::option::Option<$crate::Value> {
                $(
                    if name == $crate::entity!(@property $field $(=> $property)?) {
                        return ::std::option::Option::Some($crate::AsValue::as_value(
                            ::std::clone::Clone::clone(&self.$field),
                        ));
                    }
                )*
                ::std::option::Option::None
            }
            fn set_property(&mut self, name: &str, value: $crate::Value) -> $crate::Result<()> {
                $(
                    if name == $crate::entity!(@property $field $(=> $property)?) {
                        self.$field = $crate::AsValue::try_from_value(value)?;
                        return ::std::result::Result::Ok(());
                    }
                )*
                let _ = value;
                ::std::result::Result::Err($crate::Error::msg(format!(
                    "Unknown property `{}` of {}",
                    name,
                    ::std::any::type_name::<Self>()
                )))
            }
        }
    };
}
