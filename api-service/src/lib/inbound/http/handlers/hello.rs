pub async fn hello() -> &'static str {
    "Hello from API"
}
