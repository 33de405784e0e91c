use injector::injector::InjectorBuilder;
use injector::instance_provider::TypedInstanceProvider;
use injector::Injectable;
use tracing_subscriber::EnvFilter;

#[derive(Injectable, Default)]
struct Cache;

//noinspection DuplicatedCode
// run with RUST_LOG=trace and INJECTOR_TRACE_RESOLUTIONS=true to see all events
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // configuration is read from injector.json and INJECTOR_* environment variables
    let mut injector = InjectorBuilder::from_environment()
        .expect("error reading configuration")
        .build();

    injector
        .register_singleton::<Cache>()
        .expect("error registering Cache");

    // a second registration under the same key is rejected and logged
    if let Err(error) = injector.register_singleton::<Cache>() {
        println!("{error}");
    }

    injector
        .resolve_singleton::<Cache>()
        .expect("error resolving Cache");

    println!("injector '{}' holds {} binding(s)", injector.config().name, injector.len());
}
