#![allow(non_snake_case)]

use DashboardLibrary::dashboard::dashboard::Dashboard;

#[actix_web::main]
async fn main() {
    Dashboard::run().await;
    Dashboard::terminate().await;
}
