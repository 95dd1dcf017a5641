use lazy_singleton::Singleton;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let callers = (0..8).map(|_| {
        tokio::spawn(async {
            let instance = Singleton::instance().await?;
            Ok::<_, lazy_singleton::Error>(instance as *const Singleton as usize)
        })
    });

    let results = futures::future::join_all(callers).await;
    for result in results {
        println!("{:#x}", result??);
    }

    let instance = Singleton::instance().await?;
    let copy = instance.duplicate().await?;
    println!("duplicate is the shared instance: {}", std::ptr::eq(instance, copy));

    Ok(())
}
