pub mod manga_list_domain_service;
pub mod ordering;

pub use manga_list_domain_service::MangaListDomainService;
