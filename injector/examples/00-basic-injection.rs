use injector::injector::Injector;
use injector::instance_provider::TypedInstanceProvider;
use injector::Injectable;

// a default-constructible type, which can be registered as a singleton or a transient
#[derive(Injectable, Default)]
struct Settings {
    retries: u8,
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // the injector is a plain value owned by application start-up code
    let mut injector = Injector::new();

    // singletons are created right away and live as long as the injector
    injector
        .register_singleton_factory::<Settings, _>(|| Box::new(Settings { retries: 3 }))
        .expect("error registering Settings");

    // transients are created on each resolution
    injector
        .register_tagged_transient::<Settings>("scratch")
        .expect("error registering scratch Settings");

    let settings = injector
        .resolve_singleton::<Settings>()
        .expect("error resolving Settings");

    let mut scratch = injector
        .resolve_tagged_transient::<Settings>("scratch")
        .expect("error resolving scratch Settings");
    scratch.retries = 10;

    // prints "shared: 3, scratch: 10"
    println!("shared: {}, scratch: {}", settings.retries, scratch.retries);
}
