use campass_server::Settings;
use std::path::PathBuf;

#[test]
fn environment_overrides_defaults() {
    std::env::set_var("CAMPASS_SERVER__PORT", "9191");
    std::env::set_var("CAMPASS_DATABASE__PATH", "/var/lib/campass/data.sqlite3");

    let settings = Settings::load();

    std::env::remove_var("CAMPASS_SERVER__PORT");
    std::env::remove_var("CAMPASS_DATABASE__PATH");

    let settings = settings.unwrap();
    assert_eq!(settings.server.port, 9191);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(
        settings.database.path,
        PathBuf::from("/var/lib/campass/data.sqlite3")
    );
}
