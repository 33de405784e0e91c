use injector::component;
use injector::injector::Injector;
use injector::instance_provider::{InstanceProvider, TypedInstanceProvider};
use injector::Injectable;

// abstract capabilities are traits with Injectable as a supertrait
trait Storage: component::Injectable {
    fn describe(&self) -> String;
}

trait Clock: component::Injectable {
    fn now(&self) -> u64;
}

// concrete types list the capabilities they can be resolved as
#[derive(Injectable)]
#[injectable(interfaces(Storage))]
struct MemoryStorage {
    capacity: usize,
}

impl Storage for MemoryStorage {
    fn describe(&self) -> String {
        format!("in-memory storage for {} items", self.capacity)
    }
}

// consumers depend on the provider facade, not on the concrete injector
fn print_storage(provider: &dyn InstanceProvider) {
    match provider.resolve_singleton::<dyn Storage>() {
        Ok(storage) => println!("{}", storage.describe()),
        Err(error) => println!("no storage: {error}"),
    }
}

//noinspection DuplicatedCode
fn main() {
    let mut injector = Injector::new();

    // the factory can return anything injectable - the type is checked when resolving
    injector
        .register_singleton_factory::<dyn Storage, _>(|| Box::new(MemoryStorage { capacity: 16 }))
        .expect("error registering Storage");
    injector
        .register_singleton_factory::<dyn Clock, _>(|| Box::new(MemoryStorage { capacity: 0 }))
        .expect("error registering Clock");

    // prints "in-memory storage for 16 items"
    print_storage(&injector);

    // MemoryStorage is not a Clock, so this reports a type mismatch
    if let Err(error) = injector.resolve_singleton::<dyn Clock>() {
        println!("{error}");
    }
}
