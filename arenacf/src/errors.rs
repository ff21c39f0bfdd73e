#[macro_export]
macro_rules! eyre_imports {
    () => {
        #[allow(unused_imports)]
        use color_eyre::eyre::{
            self,    // for eyre::Result
            bail,    // for bail! on dispatch dead ends
            eyre,    // for eyre! macro
            WrapErr, // for wrap_err* methods
        };
    };
}
