#[macro_export]
macro_rules! make_smart_pointer {
    ($name:ident $(<$($gens:ident),*>)?, $inner:ty) => {
        impl$(<$($gens),*>)? std::ops::Deref for $name$(<$($gens),*>)? {
            type Target = $inner;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
        impl$(<$($gens),*>)? std::ops::DerefMut for $name$(<$($gens),*>)? {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };

    ($name:ident $(<$($gens:ident),*>)?, $inner:ty, $identifier:ident)=>{
        impl$(<$($gens),*>)? std::ops::Deref for $name$(<$($gens),*>)? {
            type Target = $inner;
            fn deref(&self) -> &Self::Target {
                &self.$identifier
            }
        }
        impl$(<$($gens),*>)? std::ops::DerefMut for $name$(<$($gens),*>)? {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.$identifier
            }
        }
    }

}

/// Name of the enclosing function, without its module path.
#[macro_export]
macro_rules! function_name {
	() => {{
		fn f() {}
		fn type_name_of<T>(_: T) -> &'static str {
			::std::any::type_name::<T>()
		}
		let name = type_name_of(f);
		let name = name.strip_suffix("::f").unwrap_or(name).trim_end_matches("::{{closure}}");
		name.rsplit("::").next().unwrap_or(name)
	}};
}

/// [`SourceLocation`](crate::backtrace::SourceLocation) of the macro call, enclosing function included.
#[macro_export]
macro_rules! caller {
	() => {
		$crate::backtrace::SourceLocation::new(Some($crate::function_name!().to_owned()), file!(), line!())
	};
}

/// Builds a `SystemError` located where the macro is called.
/// ## Example
/// ```ignore
/// bus.publish_event(system_error!("could not reserve {} seats", seats)).await?;
/// bus.publish_event(system_error!(err: io_error)).await?;
/// ```
#[macro_export]
macro_rules! system_error {
	(err: $error:expr) => {
		$crate::prelude::SystemError::from_error(&$error).with_location($crate::caller!())
	};
	($($arg:tt)+) => {
		$crate::prelude::SystemError::new(format!($($arg)+)).with_location($crate::caller!())
	};
}

/// Builds a `Log` located where the macro is called.
#[macro_export]
macro_rules! log_entry {
	($($arg:tt)+) => {
		$crate::prelude::Log::new(format!($($arg)+)).with_location($crate::caller!())
	};
}
