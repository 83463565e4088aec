//! Creates the blog schema: posts, their tag rows, images, and the
//! post-image ownership links.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(integer(BlogPost::Id).primary_key())
                    .col(string(BlogPost::Title))
                    .col(text(BlogPost::Content))
                    .col(string_null(BlogPost::Author))
                    .col(string(BlogPost::Date))
                    .col(binary_null(BlogPost::PreviewImage))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTag::Table)
                    .if_not_exists()
                    .col(integer(PostTag::PostId))
                    .col(integer(PostTag::Position))
                    .col(string(PostTag::Tag))
                    .primary_key(
                        Index::create()
                            .col(PostTag::PostId)
                            .col(PostTag::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tag_blog_post")
                            .from(PostTag::Table, PostTag::PostId)
                            .to(BlogPost::Table, BlogPost::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(integer(Images::Id).primary_key())
                    .col(binary(Images::Data))
                    .col(string(Images::MimeType))
                    .col(string_null(Images::Description))
                    .col(integer_null(Images::PostId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_blog_post")
                            .from(Images::Table, Images::PostId)
                            .to(BlogPost::Table, BlogPost::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostImage::Table)
                    .if_not_exists()
                    .col(integer(BlogPostImage::BlogPostId))
                    .col(integer(BlogPostImage::ImageId))
                    .primary_key(
                        Index::create()
                            .col(BlogPostImage::BlogPostId)
                            .col(BlogPostImage::ImageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_image_blog_post")
                            .from(BlogPostImage::Table, BlogPostImage::BlogPostId)
                            .to(BlogPost::Table, BlogPost::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_image_images")
                            .from(BlogPostImage::Table, BlogPostImage::ImageId)
                            .to(Images::Table, Images::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPostImage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    Table,
    Id,
    Title,
    Content,
    Author,
    Date,
    PreviewImage,
}

#[derive(DeriveIden)]
enum PostTag {
    Table,
    PostId,
    Position,
    Tag,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Data,
    MimeType,
    Description,
    PostId,
}

#[derive(DeriveIden)]
enum BlogPostImage {
    Table,
    BlogPostId,
    ImageId,
}
