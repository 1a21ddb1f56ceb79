use console::style;

/// Sets a panic hook that reports the payload and location on stderr.
pub fn set() {
    std::panic::set_hook(Box::new(|info| {
        let msg = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            info.to_string()
        };

        if let Some(loc) = info.location() {
            eprintln!(
                "{} {msg:?} at {}:{}",
                style("panic:").red(),
                loc.file(),
                loc.line()
            );
        } else {
            eprintln!("{} {msg:?}", style("panic:").red());
        }
    }));
}
