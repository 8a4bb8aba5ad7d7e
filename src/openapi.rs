use utoipa::OpenApi;

use crate::handlers::{accounts, customers, purchased_softwares, software};

#[derive(OpenApi)]
#[openapi(
    info(title = "Software order service"),
    paths(
        customers::get_customer,
        accounts::get_account,
        software::list_software,
        software::order_software,
        purchased_softwares::cancel_purchase,
        purchased_softwares::change_quantity,
        purchased_softwares::extend_expiry_date,
    ),
    components(schemas(
        customers::CustomerResponse,
        customers::AccountSummaryResponse,
        accounts::AccountResponse,
        software::SoftwareOfferingResponse,
        software::OrderSoftwareRequest,
        software::OrderSoftwareResponse,
        purchased_softwares::PurchasedSoftwareResponse,
        purchased_softwares::ChangeQuantityRequest,
        purchased_softwares::ExtendExpiryRequest,
    )),
    tags(
        (name = "customers", description = "Customer lookups"),
        (name = "accounts", description = "Account lookups"),
        (name = "software", description = "Catalog and ordering"),
        (name = "purchased-softwares", description = "Changes to existing purchases"),
    )
)]
pub struct ApiDoc;
