pub mod manga_list;
