//! Table and column identifiers for the catalog schema.

use sea_query::Iden;

#[derive(Iden)]
pub(crate) enum Book {
    Table,
    Id,
    Title,
    Publisher,
    ReleasedDate,
}

#[derive(Iden)]
pub(crate) enum BookImage {
    Table,
    BookId,
    Image,
}

#[derive(Iden)]
pub(crate) enum BookAuthor {
    Table,
    BookId,
    AuthorId,
}

#[derive(Iden)]
pub(crate) enum Author {
    Table,
    Id,
}

#[derive(Iden)]
pub(crate) enum BookGenre {
    Table,
    BookId,
    GenreId,
}

#[derive(Iden)]
pub(crate) enum Genre {
    Table,
    Id,
    Title,
    Description,
    ParentId,
}
