/// declares a `Context` trait for results whose error converts into the
/// given type. the message is placed in front of whatever the conversion
/// already attached.
///
/// the invoking crate provides the impl since only it knows its conversions.
#[macro_export]
macro_rules! context_trait {
    ($e:path) => {
        pub trait Context<T> {
            fn context<C>(self, cxt: C) -> std::result::Result<T, $e>
            where
                C: Into<String>;
        }
    };
}
